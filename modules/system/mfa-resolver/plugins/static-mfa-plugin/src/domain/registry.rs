//! Provider registry backed by configuration.

use std::collections::HashMap;
use std::sync::Arc;

use mfa_resolver_sdk::{MultifactorProvider, ProviderEntry, ProviderRegistry};
use tracing::debug;

use super::error::StaticPluginError;
use super::provider::StaticMultifactorProvider;
use crate::config::StaticMfaPluginConfig;

/// Providers and groups share one id namespace.
#[derive(Debug, Default)]
pub struct StaticProviderRegistry {
    entries: HashMap<String, ProviderEntry>,
}

impl StaticProviderRegistry {
    /// Build the registry from plugin configuration.
    ///
    /// Group members are not checked here; members that name nothing are
    /// skipped when groups are flattened.
    ///
    /// # Errors
    ///
    /// - `BlankId` if a provider or group id is blank
    /// - `DuplicateId` if an id names more than one provider or group
    /// - `EmptyGroup` if a group lists no members
    pub fn from_config(cfg: &StaticMfaPluginConfig) -> Result<Self, StaticPluginError> {
        let mut registry = Self::default();

        for provider in &cfg.providers {
            let provider = StaticMultifactorProvider::from_config(provider);
            let id = provider.id().to_owned();
            registry.insert(id, ProviderEntry::Provider(Arc::new(provider)))?;
        }

        for group in &cfg.groups {
            let members: Vec<String> = group
                .members
                .iter()
                .map(|m| m.trim())
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
                .collect();
            if members.is_empty() {
                return Err(StaticPluginError::EmptyGroup(group.id.clone()));
            }
            registry.insert(group.id.trim().to_owned(), ProviderEntry::Group { members })?;
        }

        debug!(
            entries = registry.entries.len(),
            "Loaded static multifactor provider registry"
        );
        Ok(registry)
    }

    fn insert(&mut self, id: String, entry: ProviderEntry) -> Result<(), StaticPluginError> {
        if id.is_empty() {
            return Err(StaticPluginError::BlankId);
        }
        if self.entries.contains_key(&id) {
            return Err(StaticPluginError::DuplicateId(id));
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProviderRegistry for StaticProviderRegistry {
    fn lookup(&self, id: &str) -> Option<ProviderEntry> {
        self.entries.get(id).cloned()
    }
}
