//! Decision pipeline shared by the chain resolvers.
//!
//! Once a resolver has decided that multifactor applies, the remaining steps
//! are the same: flatten candidates, select one provider, check it is
//! available, build the transition event, record it, and audit it.

use std::sync::Arc;

use mfa_resolver_sdk::{
    AuditRecord, AuditSink, DenyReason, FailureMode, MultifactorProvider, ProviderRegistry,
    ProviderSelector, RESOLVED_EVENT_ATTRIBUTE, RegisteredService, RequestContext,
    ResolutionOutcome, TransitionEvent,
};
use sso_security::Principal;
use tracing::{debug, warn};

use super::error::DomainError;
use super::flatten::flatten;

/// Flatten → select → availability → event → audit.
pub struct DecisionPipeline {
    registry: Arc<dyn ProviderRegistry>,
    selector: Arc<dyn ProviderSelector>,
    audit: Arc<dyn AuditSink>,
}

impl DecisionPipeline {
    /// Create a pipeline. Every decided event is handed to `audit`.
    #[must_use]
    pub fn new(
        registry: Arc<dyn ProviderRegistry>,
        selector: Arc<dyn ProviderSelector>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            registry,
            selector,
            audit,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &dyn ProviderRegistry {
        self.registry.as_ref()
    }

    /// Decide among the providers named by `provider_ids`.
    ///
    /// Returns `NoOpinion` if no id flattens to a live provider.
    ///
    /// # Errors
    ///
    /// - `ProviderGroupCycle` if the provider groups are cyclic
    /// - `Selection` if the selector cannot pick a provider
    /// - `ProviderProbe` if the availability check fails
    /// - `UnknownTransition` if the flow cannot take the decided event
    pub async fn decide<S: AsRef<str> + Sync>(
        &self,
        ctx: &mut RequestContext,
        service: &RegisteredService,
        principal: &Principal,
        provider_ids: &[S],
        failure_mode: FailureMode,
    ) -> Result<ResolutionOutcome, DomainError> {
        let candidates = flatten(provider_ids, self.registry.as_ref())?;
        if candidates.is_empty() {
            debug!(
                service_id = %service.service_id,
                "No multifactor authentication providers could be located for service"
            );
            return Ok(ResolutionOutcome::NoOpinion);
        }

        let provider = self.selector.resolve(&candidates, service, principal)?;
        debug!(
            provider = provider.id(),
            "Selected multifactor authentication provider for this transaction"
        );

        self.conclude(ctx, service, principal, provider.as_ref(), failure_mode)
            .await
    }

    async fn conclude(
        &self,
        ctx: &mut RequestContext,
        service: &RegisteredService,
        principal: &Principal,
        provider: &dyn MultifactorProvider,
        failure_mode: FailureMode,
    ) -> Result<ResolutionOutcome, DomainError> {
        let available =
            provider
                .is_available(service)
                .await
                .map_err(|source| DomainError::ProviderProbe {
                    provider: provider.id().to_owned(),
                    source,
                })?;

        if !available {
            warn!(
                provider = provider.id(),
                service_id = %service.service_id,
                "Multifactor authentication provider could not be verified/reached"
            );
            return Ok(match failure_mode {
                FailureMode::Closed => ResolutionOutcome::Denied(DenyReason::ProviderUnreachable {
                    provider_id: provider.id().to_owned(),
                }),
                FailureMode::Bypass => {
                    warn!(
                        service_id = %service.service_id,
                        "Policy allows bypass; continuing without multifactor authentication"
                    );
                    ResolutionOutcome::NoOpinion
                }
            });
        }

        let event = TransitionEvent::for_provider(principal, service, provider.id());
        if !ctx.accepts_transition(event.id()) {
            return Err(DomainError::UnknownTransition {
                event_id: event.id().to_owned(),
            });
        }
        debug!(
            provider = provider.id(),
            service = %service.name,
            "Built event based on the authentication provider and service"
        );

        ctx.put_attribute(RESOLVED_EVENT_ATTRIBUTE, serde_json::to_value(&event)?);
        self.emit_audit(&event).await;

        Ok(ResolutionOutcome::Decided(event))
    }

    // Audit failures are reported, never propagated.
    async fn emit_audit(&self, event: &TransitionEvent) {
        let Some(record) = AuditRecord::from_event(event) else {
            warn!(event_id = event.id(), "Transition event lacks audit attributes");
            return;
        };
        if let Err(e) = self.audit.record(&record).await {
            warn!(
                event_id = event.id(),
                error = %e,
                "Failed to record multifactor decision audit entry"
            );
        }
    }
}
