//! Error types for the multifactor resolver module.

use thiserror::Error;

/// Errors that can occur when resolving the next multifactor step.
///
/// These represent genuine faults only. "Policy does not apply" is
/// `ResolutionOutcome::NoOpinion` and "policy cannot be satisfied" is
/// `ResolutionOutcome::Denied`, not error variants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MfaResolverError {
    /// Policy or provider configuration is internally inconsistent.
    /// Surfaced to the operator; retrying will not help.
    #[error("configuration fault: {0}")]
    ConfigurationFault(String),

    /// A dependency (provider probe, directory, database) failed or timed out.
    #[error("backend failure: {0}")]
    BackendFailure(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure reported by a provider availability probe.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The probe could not complete.
    #[error("availability probe failed: {0}")]
    Probe(String),

    /// The probe exceeded the collaborator's timeout.
    #[error("availability probe timed out")]
    Timeout,
}

/// Failure of a provider selection strategy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The selector was called with an empty candidate set.
    #[error("no candidate providers supplied to selector")]
    NoCandidates,
}
