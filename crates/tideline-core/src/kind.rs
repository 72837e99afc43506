//! Resource kinds and the descriptor trait every managed kind implements.
//!
//! A kind is described once, declaratively: its route prefix, its attribute
//! type, and which attribute fields are sensitive, write-only or computed by
//! the server. The client and reconciler layers are generic over
//! [`EntityKind`] and never special-case a concrete kind.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::attributes::{
    BotAttributes, DatasetAttributes, FileAttributes, IntegrationAttributes, SecretAttributes,
    SkillsetAttributes,
};

/// The closed set of resource kinds managed by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Bot,
    Dataset,
    File,
    Integration,
    Secret,
    Skillset,
}

impl ResourceKind {
    /// Every kind, in a stable order.
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Bot,
        ResourceKind::Dataset,
        ResourceKind::File,
        ResourceKind::Integration,
        ResourceKind::Secret,
        ResourceKind::Skillset,
    ];

    /// Lower-cased name, used as the route prefix and in addresses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::Dataset => "dataset",
            Self::File => "file",
            Self::Integration => "integration",
            Self::Secret => "secret",
            Self::Skillset => "skillset",
        }
    }

    /// Sensitive fields of the kind's descriptor, for hosts that only hold
    /// the runtime tag.
    #[must_use]
    pub fn sensitive_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Bot => Bot::SENSITIVE_FIELDS,
            Self::Dataset => Dataset::SENSITIVE_FIELDS,
            Self::File => File::SENSITIVE_FIELDS,
            Self::Integration => Integration::SENSITIVE_FIELDS,
            Self::Secret => Secret::SENSITIVE_FIELDS,
            Self::Skillset => Skillset::SENSITIVE_FIELDS,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown resource kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Declarative descriptor of one managed kind.
///
/// Field lists name keys of the serialized attribute object:
/// - `SENSITIVE_FIELDS` are removed from everything returned by lookups.
/// - `WRITE_ONLY_FIELDS` are sent to the server but never trusted on read;
///   the previously declared value is kept.
/// - `COMPUTED_FIELDS` are assigned by the server and never sent.
pub trait EntityKind: Send + Sync + 'static {
    /// Kind tag.
    const KIND: ResourceKind;

    /// Kind-specific attributes. `Default` is the documented empty value
    /// of every field; decoding fills absent fields from it.
    type Attributes: Serialize
        + DeserializeOwned
        + Clone
        + Default
        + PartialEq
        + fmt::Debug
        + Send
        + Sync
        + 'static;

    const SENSITIVE_FIELDS: &'static [&'static str] = &[];
    const WRITE_ONLY_FIELDS: &'static [&'static str] = &[];
    const COMPUTED_FIELDS: &'static [&'static str] = &[];

    /// Route prefix, e.g. `bot` for `/bot/create`.
    #[must_use]
    fn route_prefix() -> &'static str {
        Self::KIND.as_str()
    }
}

macro_rules! entity_kind {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $attrs:ty $(, $field:ident = $list:expr)* $(,)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl EntityKind for $name {
            const KIND: ResourceKind = $kind;
            type Attributes = $attrs;
            $(const $field: &'static [&'static str] = $list;)*
        }
    };
}

entity_kind!(
    /// Conversational bot bound to an optional dataset and skillset.
    Bot,
    ResourceKind::Bot,
    BotAttributes
);
entity_kind!(
    /// Container of files used for retrieval.
    Dataset,
    ResourceKind::Dataset,
    DatasetAttributes
);
entity_kind!(
    /// File stored in a dataset.
    File,
    ResourceKind::File,
    FileAttributes,
    COMPUTED_FIELDS = &["size_bytes"],
);
entity_kind!(
    /// External data source feeding a dataset.
    Integration,
    ResourceKind::Integration,
    IntegrationAttributes,
    COMPUTED_FIELDS = &["status"],
);
entity_kind!(
    /// Named secret. Its value is write-only and never exposed by lookups.
    Secret,
    ResourceKind::Secret,
    SecretAttributes,
    SENSITIVE_FIELDS = &["value"],
    WRITE_ONLY_FIELDS = &["value"],
);
entity_kind!(
    /// Collection of callable skills described by a schema.
    Skillset,
    ResourceKind::Skillset,
    SkillsetAttributes
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>().unwrap(), kind);
        }
        assert_eq!("Secret".parse::<ResourceKind>().unwrap(), ResourceKind::Secret);
    }

    #[test]
    fn test_unknown_kind() {
        let err = "widget".parse::<ResourceKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown resource kind: widget");
    }

    #[test]
    fn test_descriptors() {
        assert_eq!(Bot::route_prefix(), "bot");
        assert_eq!(Skillset::route_prefix(), "skillset");
        assert_eq!(Secret::SENSITIVE_FIELDS, &["value"]);
        assert!(Bot::SENSITIVE_FIELDS.is_empty());
        assert_eq!(File::COMPUTED_FIELDS, &["size_bytes"]);
        assert_eq!(ResourceKind::Secret.sensitive_fields(), &["value"]);
        assert!(ResourceKind::Dataset.sensitive_fields().is_empty());
    }
}
