//! Error taxonomy of the client layer.
//!
//! - [`TransportError`]: the request never produced a usable response
//!   (connection, timeout, request construction, body read).
//! - [`RemoteError`]: the server answered with a non-2xx status.
//! - [`ClientError::Decode`]: a 2xx body did not match the expected shape.

use std::fmt;
use std::time::Duration;

use serde_json::Value;

/// Failures below the HTTP status line.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The whole request/response cycle exceeded the configured timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// The server could not be reached.
    #[error("Connection error: {0}")]
    Connect(String),

    /// The request could not be built or its body serialized.
    #[error("Invalid request: {0}")]
    Request(String),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

/// A non-2xx answer. The body is kept verbatim; `message` is a best-effort
/// human-readable summary of it.
#[derive(Clone, thiserror::Error)]
#[error("HTTP {status}: {message}")]
pub struct RemoteError {
    pub status: u16,
    pub message: String,
    pub body: Vec<u8>,
}

impl RemoteError {
    /// Builds the error and extracts a message from `{"error": {"message": ..}}`,
    /// `{"message": ..}` or `{"error": ".."}`, falling back to the raw text.
    #[must_use]
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        let message = extract_message(&body).unwrap_or_else(|| {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            if text.is_empty() {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown status")
                    .to_string()
            } else {
                text
            }
        });
        Self {
            status,
            message,
            body,
        }
    }

    /// The identifier does not exist remotely.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Debug for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteError")
            .field("status", &self.status)
            .field("message", &self.message)
            .field("body_len", &self.body.len())
            .finish()
    }
}

fn extract_message(body: &[u8]) -> Option<String> {
    let json: Value = serde_json::from_slice(body).ok()?;
    let message = json
        .pointer("/error/message")
        .or_else(|| json.get("message"))
        .or_else(|| json.get("error"))
        .and_then(Value::as_str)?;
    Some(message.to_string())
}

/// Any failure of a client call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A success response could not be parsed into the expected type.
    #[error("Failed to decode {kind} response: {message}")]
    Decode { kind: &'static str, message: String },

    /// A create call succeeded but the server assigned no identifier.
    #[error("{kind} create response carried no identifier")]
    MissingIdentifier { kind: &'static str },
}

impl ClientError {
    #[must_use]
    pub fn decode(kind: &'static str, err: &serde_json::Error) -> Self {
        Self::Decode {
            kind,
            message: err.to_string(),
        }
    }

    /// Returns `true` for a remote "not found" answer.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote(remote) if remote.is_not_found())
    }

    /// Returns the remote status code, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote(remote) => Some(remote.status),
            _ => None,
        }
    }

    /// Returns the error category for logging purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(TransportError::Timeout { .. }) => ErrorCategory::Timeout,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::Remote(remote) if remote.is_not_found() => ErrorCategory::NotFound,
            Self::Remote(_) => ErrorCategory::Remote,
            Self::Decode { .. } | Self::MissingIdentifier { .. } => ErrorCategory::Decode,
        }
    }
}

/// Categories of client errors for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Timeout,
    Transport,
    NotFound,
    Remote,
    Decode,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Transport => write!(f, "transport"),
            Self::NotFound => write!(f, "not_found"),
            Self::Remote => write!(f, "remote"),
            Self::Decode => write!(f, "decode"),
        }
    }
}
