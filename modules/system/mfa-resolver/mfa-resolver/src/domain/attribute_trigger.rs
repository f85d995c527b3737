//! Registered-service principal-attribute resolver.
//!
//! Owns the conditional policies the policy gate rejects: a policy whose
//! attribute-name trigger names one or more principal attributes applies
//! only when one of those attributes carries a matching value.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use mfa_resolver_sdk::{
    EventResolver, MfaResolverError, MultifactorPolicy, RequestContext, ResolutionOutcome,
};
use regex::Regex;
use sso_security::Principal;
use tracing::{debug, warn};

use super::decision::DecisionPipeline;
use super::error::{DomainError, log_and_convert};

/// Decides multifactor for conditional policies whose principal-attribute
/// trigger matches the current principal.
pub struct PrincipalAttributeTriggerResolver {
    pipeline: Arc<DecisionPipeline>,
    /// Compiled value triggers keyed by their configured pattern.
    value_triggers: DashMap<String, Regex>,
}

impl PrincipalAttributeTriggerResolver {
    #[must_use]
    pub fn new(pipeline: Arc<DecisionPipeline>) -> Self {
        Self {
            pipeline,
            value_triggers: DashMap::new(),
        }
    }

    fn value_trigger(&self, pattern: &str) -> Result<Regex, DomainError> {
        if let Some(compiled) = self.value_triggers.get(pattern) {
            return Ok(compiled.clone());
        }
        let compiled = compile_value_trigger(pattern)?;
        self.value_triggers.insert(pattern.to_owned(), compiled.clone());
        Ok(compiled)
    }

    fn evaluate(
        &self,
        policy: &MultifactorPolicy,
        principal: &Principal,
    ) -> Result<bool, DomainError> {
        let Some(names) = policy.attribute_name_trigger() else {
            if policy.attribute_value_to_match().is_some() {
                warn!(
                    "Attribute value trigger is defined without an attribute name trigger. Skipping"
                );
            }
            return Ok(false);
        };
        let matcher = policy
            .attribute_value_to_match()
            .map(|pattern| self.value_trigger(pattern))
            .transpose()?;

        Ok(triggered(principal, names, matcher.as_ref()))
    }
}

/// Compile the value trigger. The pattern must match a whole value.
fn compile_value_trigger(pattern: &str) -> Result<Regex, DomainError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| DomainError::InvalidTrigger {
        pattern: pattern.to_owned(),
        reason: e.to_string(),
    })
}

/// Returns `true` if any named attribute has a value accepted by `matcher`.
///
/// `names` is a comma-separated list; blank entries are ignored.
fn triggered(principal: &Principal, names: &str, matcher: Option<&Regex>) -> bool {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .any(|name| {
            principal.has_attribute_value(name, |value| matcher.is_none_or(|re| re.is_match(value)))
        })
}

#[async_trait]
impl EventResolver for PrincipalAttributeTriggerResolver {
    fn name(&self) -> &'static str {
        "registered_service_principal_attribute"
    }

    #[tracing::instrument(skip_all)]
    async fn resolve(
        &self,
        ctx: &mut RequestContext,
    ) -> Result<ResolutionOutcome, MfaResolverError> {
        let (Some(service), Some(principal)) = (ctx.service().cloned(), ctx.principal().cloned())
        else {
            debug!("No service or principal is available to evaluate attribute triggers");
            return Ok(ResolutionOutcome::NoOpinion);
        };
        let Some(policy) = service
            .policy()
            .filter(|policy| !policy.providers.is_empty())
        else {
            return Ok(ResolutionOutcome::NoOpinion);
        };

        let applies = self
            .evaluate(policy, &principal)
            .map_err(|e| log_and_convert("resolve_principal_attribute_trigger", e))?;
        if !applies {
            debug!(
                service_id = %service.service_id,
                principal = principal.id(),
                "Principal attributes do not trigger multifactor authentication"
            );
            return Ok(ResolutionOutcome::NoOpinion);
        }

        let provider_ids = self.pipeline.registry().provider_ids_for(&service);
        self.pipeline
            .decide(ctx, &service, &principal, &provider_ids, policy.failure_mode)
            .await
            .map_err(|e| log_and_convert("resolve_principal_attribute_trigger", e))
    }
}
