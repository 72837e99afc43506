//! Remote entities, declared records and list pages.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A managed entity as reported by the server.
///
/// Identifier and timestamps are server-assigned. Fields absent on the wire
/// decode to their empty value; the attribute object is flattened so the
/// wire shape is a single JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity<A> {
    #[serde(default)]
    pub id: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(flatten)]
    pub attributes: A,
}

impl<A> Entity<A> {
    /// Returns `true` once the server has assigned an identifier.
    #[must_use]
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Host-owned declared record of one entity.
///
/// `id == None` means Unmanaged. `attributes == None` means unknown, which
/// only happens between Import and the following Read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<A> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<A>,
}

impl<A> Record<A> {
    /// A record carrying only author intent, not yet created.
    #[must_use]
    pub fn declared(attributes: A) -> Self {
        Self {
            id: None,
            created_at: None,
            updated_at: None,
            attributes: Some(attributes),
        }
    }

    /// A Present record holding nothing but an identifier.
    #[must_use]
    pub fn imported(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            created_at: None,
            updated_at: None,
            attributes: None,
        }
    }

    /// Builds a Present record mirroring server truth.
    #[must_use]
    pub fn from_entity(entity: Entity<A>) -> Self {
        Self {
            id: Some(entity.id),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            attributes: Some(entity.attributes),
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.id().is_some()
    }
}

/// Opaque pagination token issued by the server. Never parsed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({})", self.0)
    }
}

/// One page of a listing: `{ items: [...], cursor?: "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<A> {
    #[serde(default = "Vec::new")]
    pub items: Vec<Entity<A>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

impl<A> ListPage<A> {
    /// Cursor for the following page. An empty token counts as absent.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref().filter(|c| !c.is_empty())
    }
}

impl<A> Default for ListPage<A> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
        }
    }
}
