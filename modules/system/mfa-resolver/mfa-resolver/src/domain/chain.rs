//! Ordered resolver chain.

use std::sync::Arc;

use async_trait::async_trait;
use mfa_resolver_sdk::{EventResolver, MfaResolverError, RequestContext, ResolutionOutcome};
use tracing::debug;

/// Consults resolvers in order; the first outcome other than `NoOpinion`
/// wins. Errors stop the chain.
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn EventResolver>>,
}

impl ResolverChain {
    #[must_use]
    pub fn new(resolvers: Vec<Arc<dyn EventResolver>>) -> Self {
        Self { resolvers }
    }

    /// Names of the chained resolvers, in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resolvers.iter().map(|r| r.name())
    }
}

#[async_trait]
impl EventResolver for ResolverChain {
    fn name(&self) -> &'static str {
        "chain"
    }

    #[tracing::instrument(skip_all)]
    async fn resolve(
        &self,
        ctx: &mut RequestContext,
    ) -> Result<ResolutionOutcome, MfaResolverError> {
        for resolver in &self.resolvers {
            let outcome = resolver.resolve(ctx).await?;
            if !outcome.is_no_opinion() {
                debug!(resolver = resolver.name(), "Resolver produced a decision");
                return Ok(outcome);
            }
        }
        Ok(ResolutionOutcome::NoOpinion)
    }
}
