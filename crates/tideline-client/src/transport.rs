//! Authenticated request execution against a single base endpoint.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::ClientResult;
use crate::config::ClientConfig;
use crate::error::{ClientError, RemoteError, TransportError};

/// The fixed set of call shapes the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Fetch,
    Create,
    Update,
    Delete,
    List,
}

impl Method {
    fn http(self) -> reqwest::Method {
        match self {
            Self::Fetch | Self::List => reqwest::Method::GET,
            Self::Create | Self::Update | Self::Delete => reqwest::Method::POST,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stateless HTTP executor. Holds only the immutable configuration.
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

impl Transport {
    /// Builds the HTTP client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url().as_str().trim_end_matches('/').to_string(),
            token: config.token().to_string(),
            timeout: config.timeout(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Executes one call and returns the raw body of a 2xx response.
    ///
    /// A present body is serialized to JSON; `None` sends no payload.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] for serialization, connection, timeout or
    ///   body-read failures.
    /// - [`ClientError::Remote`] for any status outside 200-299.
    pub async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let mut req = self
            .http
            .request(method.http(), &url)
            .bearer_auth(&self.token)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(body) = body {
            let payload =
                serde_json::to_vec(body).map_err(|e| TransportError::Request(e.to_string()))?;
            req = req.body(payload);
        }

        let started = Instant::now();
        let resp = req.send().await.map_err(|e| self.classify(&e))?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    timeout: self.timeout,
                }
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        tracing::debug!(
            method = %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API call completed"
        );

        if !status.is_success() {
            let err: ClientError = RemoteError::new(status.as_u16(), bytes.to_vec()).into();
            if !err.is_not_found() {
                tracing::warn!(
                    method = %method,
                    path,
                    status = status.as_u16(),
                    category = %err.category(),
                    "API call failed"
                );
            }
            return Err(err);
        }

        Ok(bytes.to_vec())
    }

    fn classify(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                timeout: self.timeout,
            }
        } else if err.is_builder() {
            TransportError::Request(err.to_string())
        } else if err.is_body() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Connect(err.to_string())
        }
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
