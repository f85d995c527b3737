//! Request-parameter resolver: the request itself names the provider.

use std::sync::Arc;

use async_trait::async_trait;
use mfa_resolver_sdk::{EventResolver, MfaResolverError, RequestContext, ResolutionOutcome};
use tracing::{debug, warn};

use super::decision::DecisionPipeline;
use super::error::log_and_convert;

/// Decides for the provider named by a request parameter, when that
/// provider is registered.
pub struct RequestParameterResolver {
    parameter: String,
    pipeline: Arc<DecisionPipeline>,
}

impl RequestParameterResolver {
    /// `parameter` is the request parameter carrying the provider id.
    #[must_use]
    pub fn new(parameter: impl Into<String>, pipeline: Arc<DecisionPipeline>) -> Self {
        Self {
            parameter: parameter.into(),
            pipeline,
        }
    }
}

#[async_trait]
impl EventResolver for RequestParameterResolver {
    fn name(&self) -> &'static str {
        "request_parameter"
    }

    #[tracing::instrument(skip_all)]
    async fn resolve(
        &self,
        ctx: &mut RequestContext,
    ) -> Result<ResolutionOutcome, MfaResolverError> {
        let Some(requested) = ctx
            .parameter(&self.parameter)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
        else {
            return Ok(ResolutionOutcome::NoOpinion);
        };
        let (Some(service), Some(principal)) = (ctx.service().cloned(), ctx.principal().cloned())
        else {
            debug!("No service or principal is available to honor the requested provider");
            return Ok(ResolutionOutcome::NoOpinion);
        };

        if self.pipeline.registry().lookup(&requested).is_none() {
            warn!(
                parameter = %self.parameter,
                requested = %requested,
                "Requested multifactor authentication provider is not registered"
            );
            return Ok(ResolutionOutcome::NoOpinion);
        }

        let failure_mode = service
            .policy()
            .map(|p| p.failure_mode)
            .unwrap_or_default();
        self.pipeline
            .decide(ctx, &service, &principal, &[requested], failure_mode)
            .await
            .map_err(|e| log_and_convert("resolve_request_parameter", e))
    }
}
