//! Provider: the host's entry point.
//!
//! The host calls [`Provider::configure`] once with the connection settings
//! (or hands over an existing [`ApiClient`]); afterwards it asks for
//! per-kind resources and lookups. Each of those receives the shared
//! transport through its constructor. Asking before configuration is a
//! contract violation and fails immediately.

use std::sync::Arc;

use tideline_client::{ApiClient, ClientConfig};
use tideline_core::{
    Bot, Dataset, EntityKind, File, Integration, ResourceKind, Secret, Skillset,
};

use crate::dynamic::{DynLookup, DynResource};
use crate::error::{ProviderError, ProviderResult};
use crate::lookup::Lookup;
use crate::resource::Resource;

#[derive(Debug, Clone, Default)]
pub struct Provider {
    api: Option<ApiClient>,
}

impl Provider {
    /// An unconfigured provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the shared transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Configure`] if the HTTP client cannot be built.
    pub fn configure(&mut self, config: &ClientConfig) -> ProviderResult<()> {
        let api = ApiClient::new(config)?;
        tracing::debug!(
            base_url = %config.base_url(),
            timeout = ?config.timeout(),
            "Provider configured"
        );
        self.api = Some(api);
        Ok(())
    }

    /// Uses an already built client.
    #[must_use]
    pub fn with_api(api: ApiClient) -> Self {
        Self { api: Some(api) }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api.is_some()
    }

    fn api(&self, kind: ResourceKind, component: &'static str) -> ProviderResult<&ApiClient> {
        self.api
            .as_ref()
            .ok_or(ProviderError::NotConfigured { kind, component })
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::NotConfigured`] before [`Provider::configure`].
    pub fn resource<K: EntityKind>(&self) -> ProviderResult<Resource<K>> {
        Ok(Resource::new(self.api(K::KIND, "resource")?.entity()))
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::NotConfigured`] before [`Provider::configure`].
    pub fn lookup<K: EntityKind>(&self) -> ProviderResult<Lookup<K>> {
        Ok(Lookup::new(self.api(K::KIND, "lookup")?.entity()))
    }

    /// Type-erased resource for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotConfigured`] before [`Provider::configure`].
    pub fn resource_for(&self, kind: ResourceKind) -> ProviderResult<Arc<dyn DynResource>> {
        let resource: Arc<dyn DynResource> = match kind {
            ResourceKind::Bot => Arc::new(self.resource::<Bot>()?),
            ResourceKind::Dataset => Arc::new(self.resource::<Dataset>()?),
            ResourceKind::File => Arc::new(self.resource::<File>()?),
            ResourceKind::Integration => Arc::new(self.resource::<Integration>()?),
            ResourceKind::Secret => Arc::new(self.resource::<Secret>()?),
            ResourceKind::Skillset => Arc::new(self.resource::<Skillset>()?),
        };
        Ok(resource)
    }

    /// Type-erased lookup for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotConfigured`] before [`Provider::configure`].
    pub fn lookup_for(&self, kind: ResourceKind) -> ProviderResult<Arc<dyn DynLookup>> {
        let lookup: Arc<dyn DynLookup> = match kind {
            ResourceKind::Bot => Arc::new(self.lookup::<Bot>()?),
            ResourceKind::Dataset => Arc::new(self.lookup::<Dataset>()?),
            ResourceKind::File => Arc::new(self.lookup::<File>()?),
            ResourceKind::Integration => Arc::new(self.lookup::<Integration>()?),
            ResourceKind::Secret => Arc::new(self.lookup::<Secret>()?),
            ResourceKind::Skillset => Arc::new(self.lookup::<Skillset>()?),
        };
        Ok(lookup)
    }
}
