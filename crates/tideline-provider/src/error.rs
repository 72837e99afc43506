//! Provider error types.
//!
//! Client failures are wrapped with call context (operation, kind,
//! identifier) and otherwise passed through untouched.

use std::fmt;

use tideline_client::{ClientError, ErrorCategory, TransportError};
use tideline_core::{ResourceKind, UnknownKind};

/// Lifecycle hook or lookup that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
    FetchOne,
    FetchAll,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Read => write!(f, "read"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::Import => write!(f, "import"),
            Self::FetchOne => write!(f, "fetch"),
            Self::FetchAll => write!(f, "list"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A component was requested before the transport was injected.
    #[error("Provider is not configured: configure() must run before the {kind} {component} is used")]
    NotConfigured {
        kind: ResourceKind,
        component: &'static str,
    },

    /// The transport could not be built during configuration.
    #[error("Failed to configure provider: {0}")]
    Configure(#[from] TransportError),

    /// A client call failed.
    #[error("Failed to {operation} {kind} {}: {source}", .id.as_deref().unwrap_or("(new)"))]
    Operation {
        operation: Operation,
        kind: ResourceKind,
        id: Option<String>,
        source: ClientError,
    },

    /// The host handed over a record that does not fit the operation.
    #[error("Invalid {kind} record for {operation}: {reason}")]
    InvalidRecord {
        operation: Operation,
        kind: ResourceKind,
        reason: String,
    },

    /// The server kept returning a cursor that was already consumed.
    #[error("Pagination of {kind} did not terminate: cursor {cursor} repeated")]
    PaginationLoop { kind: ResourceKind, cursor: String },

    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
}

impl ProviderError {
    #[must_use]
    pub fn operation(
        operation: Operation,
        kind: ResourceKind,
        id: Option<&str>,
        source: ClientError,
    ) -> Self {
        Self::Operation {
            operation,
            kind,
            id: id.map(str::to_string),
            source,
        }
    }

    #[must_use]
    pub fn invalid_record(
        operation: Operation,
        kind: ResourceKind,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRecord {
            operation,
            kind,
            reason: reason.into(),
        }
    }

    /// The underlying client error, if any.
    #[must_use]
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Operation { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Failure class of the underlying client error.
    #[must_use]
    pub fn category(&self) -> Option<ErrorCategory> {
        self.client_error().map(ClientError::category)
    }

    /// Returns `true` if the remote reported the identifier as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.client_error().is_some_and(ClientError::is_not_found)
    }
}

/// Type alias for a provider result.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tideline_client::RemoteError;

    #[test]
    fn test_operation_error_display_carries_context() {
        let err = ProviderError::operation(
            Operation::Delete,
            ResourceKind::Bot,
            Some("bot_1"),
            RemoteError::new(500, br#"{"message": "boom"}"#.to_vec()).into(),
        );
        assert_eq!(err.to_string(), "Failed to delete bot bot_1: HTTP 500: boom");
        assert!(!err.is_not_found());

        let err = ProviderError::operation(
            Operation::Create,
            ResourceKind::Dataset,
            None,
            RemoteError::new(400, br#"{"message": "bad"}"#.to_vec()).into(),
        );
        assert_eq!(err.to_string(), "Failed to create dataset (new): HTTP 400: bad");
        assert_eq!(err.category(), Some(ErrorCategory::Remote));
    }

    #[test]
    fn test_not_found_predicate() {
        let err = ProviderError::operation(
            Operation::FetchOne,
            ResourceKind::Secret,
            Some("s1"),
            RemoteError::new(404, Vec::new()).into(),
        );
        assert!(err.is_not_found());

        let err = ProviderError::NotConfigured {
            kind: ResourceKind::Bot,
            component: "resource",
        };
        assert!(!err.is_not_found());
        assert!(err.client_error().is_none());
        assert_eq!(err.category(), None);
    }
}
