//! Provider selection strategies.
//!
//! All strategies walk the candidate set in identifier order, so identical
//! inputs always produce the same winner.

use std::sync::Arc;

use mfa_resolver_sdk::{
    MultifactorProvider, ProviderSelector, ProviderSet, RegisteredService, SelectionError,
};
use sso_security::Principal;
use tracing::debug;

/// Picks the candidate with the highest rank; ties go to the smallest id.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankedProviderSelector;

impl ProviderSelector for RankedProviderSelector {
    fn resolve(
        &self,
        candidates: &ProviderSet,
        _service: &RegisteredService,
        _principal: &Principal,
    ) -> Result<Arc<dyn MultifactorProvider>, SelectionError> {
        let mut best: Option<&Arc<dyn MultifactorProvider>> = None;

        for candidate in candidates.iter() {
            match best {
                None => best = Some(candidate),
                Some(current) => {
                    if candidate.rank() > current.rank() {
                        best = Some(candidate);
                    }
                }
            }
        }

        best.cloned().ok_or(SelectionError::NoCandidates)
    }
}

/// Picks the candidate with the smallest id, ignoring rank.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstProviderSelector;

impl ProviderSelector for FirstProviderSelector {
    fn resolve(
        &self,
        candidates: &ProviderSet,
        _service: &RegisteredService,
        _principal: &Principal,
    ) -> Result<Arc<dyn MultifactorProvider>, SelectionError> {
        candidates
            .iter()
            .next()
            .cloned()
            .ok_or(SelectionError::NoCandidates)
    }
}

/// Prefers a provider named by a principal attribute.
///
/// The first candidate (in id order) whose id appears among the attribute's
/// values wins. Without a match, selection falls back to rank.
#[derive(Debug, Clone)]
pub struct PrincipalAttributeProviderSelector {
    attribute: String,
    fallback: RankedProviderSelector,
}

impl PrincipalAttributeProviderSelector {
    #[must_use]
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            fallback: RankedProviderSelector,
        }
    }
}

impl ProviderSelector for PrincipalAttributeProviderSelector {
    fn resolve(
        &self,
        candidates: &ProviderSet,
        service: &RegisteredService,
        principal: &Principal,
    ) -> Result<Arc<dyn MultifactorProvider>, SelectionError> {
        if candidates.is_empty() {
            return Err(SelectionError::NoCandidates);
        }

        let preferred = principal.attribute(&self.attribute).unwrap_or_default();
        if let Some(hit) = candidates
            .iter()
            .find(|c| preferred.iter().any(|p| p == c.id()))
        {
            debug!(
                attribute = %self.attribute,
                provider = hit.id(),
                "Selected provider preferred by principal attribute"
            );
            return Ok(Arc::clone(hit));
        }

        self.fallback.resolve(candidates, service, principal)
    }
}
