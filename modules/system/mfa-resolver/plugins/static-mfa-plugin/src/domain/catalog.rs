//! Registered-service catalog.
//!
//! Maps an inbound service URL to the registered service whose `service_id`
//! pattern matches it. When several services match, the lowest numeric id
//! wins.

use std::collections::BTreeMap;
use std::sync::Arc;

use mfa_resolver_sdk::RegisteredService;
use regex::Regex;
use tracing::debug;

use super::error::StaticPluginError;

struct Entry {
    pattern: Regex,
    service: Arc<RegisteredService>,
}

#[derive(Default)]
pub struct ServiceCatalog {
    // Keyed by registered-service id; iteration order is match precedence.
    entries: BTreeMap<i64, Entry>,
}

impl ServiceCatalog {
    /// Compile every service pattern.
    ///
    /// # Errors
    ///
    /// - `DuplicateService` if two services share an id
    /// - `InvalidServicePattern` if a `service_id` is not a valid regex
    pub fn from_services(services: &[RegisteredService]) -> Result<Self, StaticPluginError> {
        let mut entries = BTreeMap::new();
        for service in services {
            if entries.contains_key(&service.id) {
                return Err(StaticPluginError::DuplicateService { id: service.id });
            }
            let pattern = Regex::new(&format!("^(?:{})$", service.service_id)).map_err(|e| {
                StaticPluginError::InvalidServicePattern {
                    id: service.id,
                    reason: e.to_string(),
                }
            })?;
            entries.insert(
                service.id,
                Entry {
                    pattern,
                    service: Arc::new(service.clone()),
                },
            );
        }
        Ok(Self { entries })
    }

    /// The registered service matching `url`, if any.
    #[must_use]
    pub fn find_by_url(&self, url: &str) -> Option<Arc<RegisteredService>> {
        let found = self
            .entries
            .values()
            .find(|entry| entry.pattern.is_match(url))
            .map(|entry| entry.service.clone());
        if found.is_none() {
            debug!(url, "No registered service matches the service URL");
        }
        found
    }

    #[must_use]
    pub fn find_by_id(&self, id: i64) -> Option<Arc<RegisteredService>> {
        self.entries.get(&id).map(|entry| entry.service.clone())
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
