//! Kind-specific attributes.
//!
//! Every struct is `#[serde(default)]`: a field missing on the wire or in a
//! declared configuration takes its type's empty value (`""`, `0`, `[]`,
//! `None`) and never produces an error. Unknown fields are ignored.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotAttributes {
    pub name: String,
    pub description: String,
    pub model: String,
    pub temperature: f64,
    pub instructions: String,
    /// Linked dataset identifier, empty when unlinked.
    pub dataset_id: String,
    /// Linked skillset identifier, empty when unlinked.
    pub skillset_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetAttributes {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAttributes {
    pub name: String,
    pub dataset_id: String,
    pub mime_type: String,
    pub content: String,
    /// Server computed.
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationAttributes {
    pub name: String,
    pub description: String,
    /// Upstream system, e.g. `notion` or `github`.
    pub provider: String,
    pub dataset_id: String,
    pub settings: BTreeMap<String, String>,
    /// Server computed sync status.
    pub status: String,
}

/// A secret's value is write-only: it is sent on create/update, kept from
/// the declared record on read, and stripped from every lookup result.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretAttributes {
    pub name: String,
    pub value: Option<String>,
}

impl fmt::Debug for SecretAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretAttributes")
            .field("name", &self.name)
            .field("value", &self.value.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsetAttributes {
    pub name: String,
    pub description: String,
    /// OpenAPI document describing the skills.
    pub schema: String,
    pub secret_ids: Vec<String>,
}
