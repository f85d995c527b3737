//! Provider whose availability comes from configuration.

use std::collections::BTreeSet;

use async_trait::async_trait;
use mfa_resolver_sdk::{MultifactorProvider, ProviderError, RegisteredService};

use crate::config::ProviderConfig;

#[derive(Debug, Clone)]
pub struct StaticMultifactorProvider {
    id: String,
    rank: i32,
    available: bool,
    unavailable_for: BTreeSet<String>,
}

impl StaticMultifactorProvider {
    #[must_use]
    pub fn from_config(cfg: &ProviderConfig) -> Self {
        Self {
            id: cfg.id.trim().to_owned(),
            rank: cfg.rank,
            available: cfg.available,
            unavailable_for: cfg.unavailable_for.iter().cloned().collect(),
        }
    }
}

#[async_trait]
impl MultifactorProvider for StaticMultifactorProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn rank(&self) -> i32 {
        self.rank
    }

    async fn is_available(&self, service: &RegisteredService) -> Result<bool, ProviderError> {
        Ok(self.available && !self.unavailable_for.contains(&service.name))
    }
}
