//! Registered-service policy resolver.

use std::sync::Arc;

use async_trait::async_trait;
use mfa_resolver_sdk::{EventResolver, MfaResolverError, RequestContext, ResolutionOutcome};
use tracing::debug;

use super::decision::DecisionPipeline;
use super::error::log_and_convert;
use super::policy_gate;

/// Decides multifactor for services whose policy unconditionally requires it.
///
/// Services without a policy, with an empty provider list or with
/// principal-attribute triggers yield `NoOpinion`.
pub struct RegisteredServicePolicyResolver {
    pipeline: Arc<DecisionPipeline>,
}

impl RegisteredServicePolicyResolver {
    #[must_use]
    pub fn new(pipeline: Arc<DecisionPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl EventResolver for RegisteredServicePolicyResolver {
    fn name(&self) -> &'static str {
        "registered_service_policy"
    }

    #[tracing::instrument(skip_all)]
    async fn resolve(
        &self,
        ctx: &mut RequestContext,
    ) -> Result<ResolutionOutcome, MfaResolverError> {
        let (Some(service), Some(principal)) = (ctx.service().cloned(), ctx.principal().cloned())
        else {
            debug!("No service or principal is available to evaluate the multifactor policy");
            return Ok(ResolutionOutcome::NoOpinion);
        };
        if !policy_gate::applies(Some(service.as_ref()), Some(principal.as_ref())) {
            return Ok(ResolutionOutcome::NoOpinion);
        }
        let failure_mode = service
            .policy()
            .map(|p| p.failure_mode)
            .unwrap_or_default();

        let provider_ids = self.pipeline.registry().provider_ids_for(&service);
        self.pipeline
            .decide(ctx, &service, &principal, &provider_ids, failure_mode)
            .await
            .map_err(|e| log_and_convert("resolve_registered_service_policy", e))
    }
}
