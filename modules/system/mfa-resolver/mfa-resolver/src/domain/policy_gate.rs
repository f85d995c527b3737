//! Policy gate: does a service's multifactor policy apply to this request?
//!
//! Only unconditional, non-empty policies pass. Conditional policies (those
//! declaring a principal-attribute trigger) belong to the attribute-trigger
//! resolver and are rejected here.

use mfa_resolver_sdk::RegisteredService;
use sso_security::Principal;
use tracing::debug;

/// Returns `true` if the registered-service policy resolver should proceed
/// to provider selection.
///
/// Absent inputs are a normal outcome, not an error.
#[must_use]
pub fn applies(service: Option<&RegisteredService>, principal: Option<&Principal>) -> bool {
    let (Some(service), Some(_principal)) = (service, principal) else {
        debug!("No service or principal is available to evaluate the multifactor policy");
        return false;
    };

    let Some(policy) = service
        .policy()
        .filter(|policy| !policy.providers.is_empty())
    else {
        debug!(
            service_id = %service.service_id,
            "Authentication policy does not contain any multifactor authentication providers"
        );
        return false;
    };

    if policy.is_conditional() {
        debug!(
            service_id = %service.service_id,
            "Authentication policy has defined principal attribute triggers. Skipping"
        );
        return false;
    }

    true
}
