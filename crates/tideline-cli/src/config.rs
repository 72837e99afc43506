//! Named profiles in `~/.tideline/config.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tideline_client::ClientConfig;

use crate::cli::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileConfig {
    pub server: Option<String>,
    pub token: Option<String>,
    pub format: Option<String>,
    pub timeout: Option<u64>,
}

impl ProfileConfig {
    /// Applies one `config set` pair.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server" => self.server = Some(value.to_string()),
            "token" => self.token = Some(value.to_string()),
            "format" => {
                OutputFormat::from_str(value, true).map_err(|_| {
                    anyhow::anyhow!("Invalid format: {value}. Expected json or table")
                })?;
                self.format = Some(value.to_lowercase());
            }
            "timeout" => {
                let secs = tideline_client::parse_timeout(value)?;
                self.timeout = Some(secs.as_secs());
            }
            other => {
                anyhow::bail!("Unknown config key: {other}. Valid keys: server, token, format, timeout")
            }
        }
        Ok(())
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
    }
}

pub type ConfigFile = BTreeMap<String, ProfileConfig>;

/// Location of the profile file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// `~/.tideline/config.toml`.
    pub fn default_location() -> Result<Self> {
        let dir = dirs::home_dir()
            .context("Cannot determine home directory")?
            .join(".tideline");
        Ok(Self::at(dir.join("config.toml")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> Result<ConfigFile> {
        if !self.path.exists() {
            return Ok(ConfigFile::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", self.path.display()))
    }

    pub fn load_profile(&self, profile: &str) -> Result<ProfileConfig> {
        Ok(self.load_all()?.remove(profile).unwrap_or_default())
    }

    pub fn save_profile(&self, profile: &str, config: &ProfileConfig) -> Result<()> {
        let mut all = self.load_all()?;
        all.insert(profile.to_string(), config.clone());
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(&all)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// Settings given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub server: Option<String>,
    pub token: Option<String>,
    pub timeout: Option<u64>,
}

/// Resolves connection settings: flag/env first, then the profile.
pub fn resolve_client(overrides: &Overrides, profile: &ProfileConfig) -> Result<ClientConfig> {
    let Some(server) = overrides.server.as_ref().or(profile.server.as_ref()) else {
        anyhow::bail!(
            "No server URL configured. Use --server, set TIDELINE_API_URL, or run: tideline config set server <url>"
        );
    };
    let Some(token) = overrides.token.as_ref().or(profile.token.as_ref()) else {
        anyhow::bail!(
            "No API token configured. Use --token, set TIDELINE_API_TOKEN, or run: tideline config set token <token>"
        );
    };
    let mut config = ClientConfig::new(server, token.clone())?;
    if let Some(secs) = overrides.timeout.or(profile.timeout) {
        anyhow::ensure!(secs > 0, "Timeout must be a positive number of seconds");
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

/// Timeout as configured, for display.
pub fn describe_timeout(profile: &ProfileConfig) -> String {
    let secs = profile
        .timeout
        .map_or(ClientConfig::DEFAULT_TIMEOUT, Duration::from_secs)
        .as_secs();
    format!("{secs}s")
}
