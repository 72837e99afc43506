//! Connection settings for the remote API.

use std::fmt;
use std::time::Duration;

use url::Url;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "TIDELINE_API_URL";
/// Environment variable holding the bearer credential.
pub const ENV_API_TOKEN: &str = "TIDELINE_API_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "TIDELINE_TIMEOUT_SECS";

/// Errors raised while assembling a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("Invalid base URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported URL scheme {0}: expected http or https")]
    UnsupportedScheme(String),

    #[error("API token must not be empty")]
    EmptyToken,

    #[error("Invalid timeout {0}: expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Immutable transport configuration: base endpoint, credential and one
/// timeout applied to the whole request/response cycle.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    token: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Default timeout for one call (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Validates the base URL and token.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, is not http(s), or the
    /// token is blank.
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self {
            base_url: parsed,
            token,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Reads `TIDELINE_API_URL`, `TIDELINE_API_TOKEN` and, optionally,
    /// `TIDELINE_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var(ENV_API_URL).map_err(|_| ConfigError::MissingEnv(ENV_API_URL))?;
        let token =
            std::env::var(ENV_API_TOKEN).map_err(|_| ConfigError::MissingEnv(ENV_API_TOKEN))?;
        let mut config = Self::new(&url, token)?;
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            config.timeout = parse_timeout(&raw)?;
        }
        Ok(config)
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Parses a positive number of seconds.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidTimeout`] for zero, negative or non-numeric input.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
