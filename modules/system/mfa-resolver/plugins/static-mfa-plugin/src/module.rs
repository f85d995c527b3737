//! Static multifactor resolver plugin module.

use std::sync::Arc;

use mfa_resolver_sdk::ProviderRegistry;
use tracing::info;

use crate::config::StaticMfaPluginConfig;
use crate::domain::{ServiceCatalog, StaticProviderRegistry};

/// Static multifactor resolver plugin.
///
/// Exposes a [`ProviderRegistry`] for the resolver and a [`ServiceCatalog`]
/// for the flow layer to resolve the target service of a request.
pub struct StaticMfaPlugin {
    registry: Arc<StaticProviderRegistry>,
    catalog: Arc<ServiceCatalog>,
}

impl StaticMfaPlugin {
    /// Build the plugin from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if provider ids collide, a group is empty, or a
    /// service pattern does not compile.
    pub fn init(cfg: &StaticMfaPluginConfig) -> anyhow::Result<Self> {
        info!("Initializing static_mfa_plugin");

        let registry = StaticProviderRegistry::from_config(cfg)?;
        let catalog = ServiceCatalog::from_services(&cfg.services)?;

        info!(
            providers = cfg.providers.len(),
            groups = cfg.groups.len(),
            services = catalog.len(),
            "Loaded plugin configuration"
        );

        Ok(Self {
            registry: Arc::new(registry),
            catalog: Arc::new(catalog),
        })
    }

    #[must_use]
    pub fn registry(&self) -> Arc<dyn ProviderRegistry> {
        self.registry.clone()
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<ServiceCatalog> {
        self.catalog.clone()
    }
}
