//! State snapshot: the declared records the host owns between runs.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tideline_core::ResourceKind;

use crate::declared::Address;

pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    pub kind: ResourceKind,
    /// Serialized `Record`: id, timestamps and attributes.
    pub record: Value,
}

impl StateEntry {
    pub fn id(&self) -> Option<&str> {
        self.record.get("id").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub version: u32,
    #[serde(default)]
    pub resources: BTreeMap<Address, StateEntry>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            resources: BTreeMap::new(),
        }
    }
}

impl State {
    /// Loads the snapshot; a missing file is an empty state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read(path).with_context(|| format!("Failed to read state {}", path.display()))?;
        let state: Self = serde_json::from_slice(&content)
            .with_context(|| format!("Invalid state file {}", path.display()))?;
        anyhow::ensure!(
            state.version == STATE_VERSION,
            "Unsupported state version {} in {} (expected {STATE_VERSION})",
            state.version,
            path.display()
        );
        for (address, entry) in &state.resources {
            anyhow::ensure!(
                address.kind == entry.kind,
                "State entry {address} records kind {}",
                entry.kind
            );
        }
        Ok(state)
    }

    /// Replaces the file atomically: the snapshot is written next to it and
    /// renamed over it.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary state in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut file, self)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(path)
            .with_context(|| format!("Failed to write state {}", path.display()))?;
        tracing::debug!(path = %path.display(), resources = self.resources.len(), "State saved");
        Ok(())
    }

    pub fn insert(&mut self, address: Address, record: Value) {
        let kind = address.kind;
        self.resources.insert(address, StateEntry { kind, record });
    }

    pub fn remove(&mut self, address: &Address) -> Option<StateEntry> {
        self.resources.remove(address)
    }

    pub fn get(&self, address: &Address) -> Option<&StateEntry> {
        self.resources.get(address)
    }

    /// Copy safe to print: sensitive attribute values are masked.
    pub fn redacted(&self) -> Value {
        let resources: serde_json::Map<String, Value> = self
            .resources
            .iter()
            .map(|(address, entry)| {
                let mut record = entry.record.clone();
                if let Some(Value::Object(attributes)) = record.get_mut("attributes") {
                    for field in entry.kind.sensitive_fields() {
                        if let Some(value) = attributes.get_mut(*field) {
                            *value = Value::String("***".into());
                        }
                    }
                }
                (address.to_string(), serde_json::json!({"kind": entry.kind, "record": record}))
            })
            .collect();
        serde_json::json!({"version": self.version, "resources": resources})
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn address(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = State::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(state, State::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tideline.state.json");

        let mut state = State::default();
        state.insert(
            address("bot.support"),
            json!({"id": "bot_0001", "attributes": {"name": "Ada"}}),
        );
        state.save(&path).unwrap();
        // overwriting keeps exactly one file
        state.save(&path).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

        let loaded = State::load(&path).unwrap();
        assert_eq!(loaded, state);
        assert_eq!(loaded.get(&address("bot.support")).unwrap().id(), Some("bot_0001"));

        let raw: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["resources"]["bot.support"]["kind"], json!("bot"));
    }

    #[test]
    fn test_load_rejects_other_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"version": 7, "resources": {}}"#).unwrap();
        let err = State::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported state version 7"));
    }

    #[test]
    fn test_load_rejects_mismatched_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"version": 1, "resources": {"bot.a": {"kind": "file", "record": {}}}}"#,
        )
        .unwrap();
        assert!(State::load(&path).is_err());
    }

    #[test]
    fn test_redacted_masks_secret_values() {
        let mut state = State::default();
        state.insert(
            address("secret.openai"),
            json!({"id": "secret_1", "attributes": {"name": "openai", "value": "sk-live"}}),
        );
        let shown = state.redacted();
        assert_eq!(
            shown["resources"]["secret.openai"]["record"]["attributes"]["value"],
            json!("***")
        );
        assert!(!shown.to_string().contains("sk-live"));
    }
}
