//! The declared configuration file.
//!
//! ```toml
//! [dataset.docs]
//! name = "Docs"
//! tags = ["public"]
//!
//! [bot.support]
//! name = "Ada"
//! model = "gpt-x"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tideline_core::ResourceKind;

/// `kind.name`: where a resource lives in the declared file and the state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    pub kind: ResourceKind,
    pub name: String,
}

impl Address {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        anyhow::ensure!(
            !name.is_empty() && !name.contains('.') && !name.chars().any(char::is_whitespace),
            "Invalid resource name {name:?}: expected a non-empty name without dots or spaces"
        );
        Ok(Self { kind, name })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.name)
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, name) = s
            .split_once('.')
            .with_context(|| format!("Invalid address {s:?}. Expected format: kind.name"))?;
        Self::new(kind.parse()?, name)
    }
}

impl TryFrom<String> for Address {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

/// Every declared resource, keyed by address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declared {
    pub resources: BTreeMap<Address, Value>,
}

impl Declared {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read declared file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid declared file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let document: toml::Table = toml::from_str(content)?;
        let mut resources = BTreeMap::new();

        for (kind, entries) in document {
            let kind: ResourceKind = kind.parse()?;
            let toml::Value::Table(entries) = entries else {
                anyhow::bail!("[{kind}] must be a table of named resources");
            };
            for (name, attributes) in entries {
                let address = Address::new(kind, name)?;
                anyhow::ensure!(
                    attributes.is_table(),
                    "{address} must be a table of attributes"
                );
                let attributes = serde_json::to_value(attributes)
                    .with_context(|| format!("{address} cannot be converted to JSON"))?;
                anyhow::ensure!(
                    !resources.contains_key(&address),
                    "{address} is declared twice"
                );
                resources.insert(address, attributes);
            }
        }
        Ok(Self { resources })
    }

    pub fn get(&self, address: &Address) -> Option<&Value> {
        self.resources.get(address)
    }
}
