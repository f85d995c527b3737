//! Domain errors for the multifactor resolver.

use mfa_resolver_sdk::{MfaResolverError, ProviderError, SelectionError};

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("provider group '{group}' contains itself")]
    ProviderGroupCycle { group: String },

    #[error("provider selection failed: {0}")]
    Selection(#[from] SelectionError),

    #[error("availability check for provider '{provider}' failed: {source}")]
    ProviderProbe {
        provider: String,
        source: ProviderError,
    },

    #[error("flow has no transition for event '{event_id}'")]
    UnknownTransition { event_id: String },

    #[error("invalid attribute trigger pattern '{pattern}': {reason}")]
    InvalidTrigger { pattern: String, reason: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<DomainError> for MfaResolverError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ProviderGroupCycle { .. }
            | DomainError::Selection(_)
            | DomainError::UnknownTransition { .. }
            | DomainError::InvalidTrigger { .. } => Self::ConfigurationFault(e.to_string()),
            DomainError::ProviderProbe { .. } => Self::BackendFailure(e.to_string()),
            DomainError::Internal(reason) => Self::Internal(reason),
        }
    }
}

/// Log a failed resolver call and convert it to the SDK error.
pub(crate) fn log_and_convert(op: &str, e: DomainError) -> MfaResolverError {
    tracing::error!(operation = op, error = ?e, "mfa_resolver call failed");
    e.into()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn configuration_errors_map_to_configuration_fault() {
        let cycle = DomainError::ProviderGroupCycle {
            group: "any-otp".to_owned(),
        };
        let selection = DomainError::from(SelectionError::NoCandidates);

        assert!(matches!(
            MfaResolverError::from(cycle),
            MfaResolverError::ConfigurationFault(msg) if msg.contains("any-otp")
        ));
        assert!(matches!(
            MfaResolverError::from(selection),
            MfaResolverError::ConfigurationFault(_)
        ));
    }

    #[test]
    fn probe_errors_map_to_backend_failure() {
        let probe = DomainError::ProviderProbe {
            provider: "mfa-duo".to_owned(),
            source: ProviderError::Timeout,
        };

        assert!(matches!(
            MfaResolverError::from(probe),
            MfaResolverError::BackendFailure(msg) if msg.contains("mfa-duo")
        ));
    }

    #[test]
    #[traced_test]
    fn conversion_logs_operation_and_error_variant() {
        let err = log_and_convert(
            "resolve_registered_service_policy",
            DomainError::UnknownTransition {
                event_id: "mfa-duo".to_owned(),
            },
        );

        assert!(matches!(err, MfaResolverError::ConfigurationFault(_)));
        assert!(logs_contain("mfa_resolver call failed"));
        assert!(logs_contain("resolve_registered_service_policy"));
        assert!(logs_contain("UnknownTransition"));
    }
}
