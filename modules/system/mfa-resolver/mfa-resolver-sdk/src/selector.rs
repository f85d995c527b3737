//! Provider selection strategy.

use std::sync::Arc;

use sso_security::Principal;

use crate::error::SelectionError;
use crate::models::RegisteredService;
use crate::provider::{MultifactorProvider, ProviderSet};

/// Chooses exactly one provider from a flattened candidate set.
///
/// Deployments inject the strategy they need (rank, principal affinity,
/// static order). Implementations must be deterministic: identical
/// candidates, service and principal always yield the same provider.
pub trait ProviderSelector: Send + Sync {
    /// Pick the provider for this transaction.
    ///
    /// Callers must pass a non-empty candidate set.
    ///
    /// # Errors
    ///
    /// Returns `NoCandidates` if `candidates` is empty.
    fn resolve(
        &self,
        candidates: &ProviderSet,
        service: &RegisteredService,
        principal: &Principal,
    ) -> Result<Arc<dyn MultifactorProvider>, SelectionError>;
}
