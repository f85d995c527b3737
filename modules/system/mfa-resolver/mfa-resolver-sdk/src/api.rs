//! Resolver chain contract.
//!
//! Every resolution strategy (registered-service policy, principal attribute
//! trigger, request parameter) implements [`EventResolver`]. The chain itself
//! implements it too, so the flow layer only ever sees one resolver.

use async_trait::async_trait;

use crate::error::MfaResolverError;
use crate::models::{RequestContext, ResolutionOutcome};

/// One link of the resolver chain.
///
/// ```ignore
/// let outcome = resolver.resolve(&mut ctx).await?;
/// if outcome.is_no_opinion() {
///     // consult the next resolver or proceed without multifactor
/// }
/// ```
#[async_trait]
pub trait EventResolver: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Decide the next multifactor step for this request.
    ///
    /// On `Decided`, the event is also written into the context attributes.
    ///
    /// # Errors
    ///
    /// - `ConfigurationFault` if policy or provider configuration is inconsistent
    /// - `BackendFailure` if a provider probe failed or timed out
    /// - `Internal` for unexpected errors
    async fn resolve(&self, ctx: &mut RequestContext)
    -> Result<ResolutionOutcome, MfaResolverError>;
}
