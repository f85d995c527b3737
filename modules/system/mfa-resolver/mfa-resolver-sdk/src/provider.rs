//! Multifactor provider capabilities.
//!
//! A provider is a pluggable additional-authentication mechanism. Providers
//! are looked up by identifier through a [`ProviderRegistry`]; identifiers
//! may also name provider groups (logical OR of alternatives) which are
//! flattened to concrete providers before selection.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::RegisteredService;

/// A concrete multifactor provider.
#[async_trait]
pub trait MultifactorProvider: Send + Sync + fmt::Debug {
    /// Provider identifier; also the transition event id.
    fn id(&self) -> &str;

    /// Rank used for tie-breaking. Higher is stronger.
    fn rank(&self) -> i32;

    /// Report whether the provider can currently serve `service`.
    ///
    /// # Errors
    ///
    /// - `Probe` if the availability check could not complete
    /// - `Timeout` if the check exceeded its deadline
    async fn is_available(&self, service: &RegisteredService) -> Result<bool, ProviderError>;
}

/// Registry entry for an identifier.
#[derive(Debug, Clone)]
pub enum ProviderEntry {
    /// A live provider instance.
    Provider(Arc<dyn MultifactorProvider>),
    /// A group of alternative identifiers (providers or nested groups).
    Group { members: Vec<String> },
}

/// Lookup of configured providers and provider groups.
pub trait ProviderRegistry: Send + Sync {
    /// Resolve an identifier to a provider or group.
    ///
    /// Returns `None` if nothing is registered under `id`.
    fn lookup(&self, id: &str) -> Option<ProviderEntry>;

    /// Provider identifiers configured for `service`.
    ///
    /// Defaults to the identifiers named by the service's multifactor policy.
    fn provider_ids_for(&self, service: &RegisteredService) -> Vec<String> {
        service
            .policy()
            .map(|p| p.providers.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Flat, de-duplicated candidate set keyed by provider id.
///
/// Iteration is in identifier order, independent of how the set was built.
#[derive(Debug, Clone, Default)]
pub struct ProviderSet {
    providers: BTreeMap<String, Arc<dyn MultifactorProvider>>,
}

impl ProviderSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a provider; returns `false` if the id was already present.
    pub fn insert(&mut self, provider: Arc<dyn MultifactorProvider>) -> bool {
        let id = provider.id().to_owned();
        if self.providers.contains_key(&id) {
            return false;
        }
        self.providers.insert(id, provider);
        true
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn MultifactorProvider>> {
        self.providers.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn MultifactorProvider>> {
        self.providers.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }
}

impl FromIterator<Arc<dyn MultifactorProvider>> for ProviderSet {
    fn from_iter<T: IntoIterator<Item = Arc<dyn MultifactorProvider>>>(iter: T) -> Self {
        let mut set = Self::new();
        for provider in iter {
            set.insert(provider);
        }
        set
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::models::MultifactorPolicy;

    #[derive(Debug)]
    struct Fixed(&'static str);

    #[async_trait]
    impl MultifactorProvider for Fixed {
        fn id(&self) -> &str {
            self.0
        }

        fn rank(&self) -> i32 {
            0
        }

        async fn is_available(&self, _service: &RegisteredService) -> Result<bool, ProviderError> {
            Ok(true)
        }
    }

    struct Empty;

    impl ProviderRegistry for Empty {
        fn lookup(&self, _id: &str) -> Option<ProviderEntry> {
            None
        }
    }

    #[test]
    fn provider_set_is_order_insensitive() {
        let a: ProviderSet = [
            Arc::new(Fixed("mfa-gauth")) as Arc<dyn MultifactorProvider>,
            Arc::new(Fixed("mfa-duo")) as Arc<dyn MultifactorProvider>,
        ]
        .into_iter()
        .collect();
        let b: ProviderSet = [
            Arc::new(Fixed("mfa-duo")) as Arc<dyn MultifactorProvider>,
            Arc::new(Fixed("mfa-gauth")) as Arc<dyn MultifactorProvider>,
        ]
        .into_iter()
        .collect();

        assert_eq!(a.ids().collect::<Vec<_>>(), b.ids().collect::<Vec<_>>());
        assert_eq!(a.ids().collect::<Vec<_>>(), vec!["mfa-duo", "mfa-gauth"]);
    }

    #[test]
    fn provider_set_ignores_duplicates() {
        let mut set = ProviderSet::new();
        assert!(set.insert(Arc::new(Fixed("mfa-duo"))));
        assert!(!set.insert(Arc::new(Fixed("mfa-duo"))));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn default_provider_ids_follow_policy() {
        let service = RegisteredService::new(1, "payroll", "payroll")
            .with_policy(MultifactorPolicy::with_providers(["mfa-gauth", "mfa-duo"]));

        assert_eq!(Empty.provider_ids_for(&service), vec!["mfa-duo", "mfa-gauth"]);
    }

    #[test]
    fn default_provider_ids_empty_without_policy() {
        let service = RegisteredService::new(1, "payroll", "payroll");
        assert!(Empty.provider_ids_for(&service).is_empty());
    }

    #[tokio::test]
    async fn provider_reports_availability() {
        let service = RegisteredService::new(1, "payroll", "payroll");
        let provider: Arc<dyn MultifactorProvider> = Arc::new(Fixed("mfa-duo"));
        assert_eq!(provider.is_available(&service).await, Ok(true));
    }
}
