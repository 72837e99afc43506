//! # tideline-client
//!
//! HTTP access to the remote API: a stateless [`Transport`] that attaches the
//! bearer credential and classifies failures, and one generic
//! [`EntityClient`] per managed kind.
//!
//! ```ignore
//! use tideline_client::{ApiClient, ClientConfig};
//! use tideline_core::BotAttributes;
//!
//! let api = ApiClient::new(&ClientConfig::from_env()?)?;
//! let bot = api.bots().create(&BotAttributes {
//!     name: "Ada".into(),
//!     model: "gpt-x".into(),
//!     temperature: 0.5,
//!     ..Default::default()
//! }).await?;
//! println!("created {}", bot.id);
//! ```

mod config;
mod entity;
mod error;
mod transport;

use std::sync::Arc;

use tideline_core::{Bot, Dataset, EntityKind, File, Integration, Secret, Skillset};

pub use config::{
    ClientConfig, ConfigError, ENV_API_TOKEN, ENV_API_URL, ENV_TIMEOUT_SECS, parse_timeout,
};
pub use entity::EntityClient;
pub use error::{ClientError, ErrorCategory, RemoteError, TransportError};
pub use transport::{Method, Transport};

/// Type alias for a client result.
pub type ClientResult<T> = Result<T, ClientError>;

/// Entry point bundling one shared [`Transport`] with per-kind accessors.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<Transport>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::from_transport(Arc::new(Transport::new(config)?)))
    }

    #[must_use]
    pub fn from_transport(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn transport(&self) -> Arc<Transport> {
        Arc::clone(&self.transport)
    }

    #[must_use]
    pub fn entity<K: EntityKind>(&self) -> EntityClient<K> {
        EntityClient::new(self.transport())
    }

    #[must_use]
    pub fn bots(&self) -> EntityClient<Bot> {
        self.entity()
    }

    #[must_use]
    pub fn datasets(&self) -> EntityClient<Dataset> {
        self.entity()
    }

    #[must_use]
    pub fn files(&self) -> EntityClient<File> {
        self.entity()
    }

    #[must_use]
    pub fn integrations(&self) -> EntityClient<Integration> {
        self.entity()
    }

    #[must_use]
    pub fn secrets(&self) -> EntityClient<Secret> {
        self.entity()
    }

    #[must_use]
    pub fn skillsets(&self) -> EntityClient<Skillset> {
        self.entity()
    }
}
