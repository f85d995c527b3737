//! Error types for the credential resolver module.

use thiserror::Error;

/// Classified credential validation failure.
///
/// Every failure a validator can hit maps to one of these; backend faults
/// are never surfaced as unclassified errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// No account matches the presented username and password.
    #[error("no account matches the presented credential")]
    NotFound,

    /// The account exists but the password does not match. Only reported by
    /// validators that can tell the two apart.
    #[error("password does not match")]
    BadPassword,

    /// The credential store could not be queried.
    #[error("credential store unavailable: {0}")]
    BackendUnavailable(String),

    /// The validator is not configured correctly.
    #[error("credential validator misconfigured: {0}")]
    Misconfigured(String),
}

impl AuthFailure {
    /// Message safe to show the end user.
    ///
    /// Identical for every variant so the user cannot learn whether the
    /// account exists or the store failed.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "authentication failed"
    }
}
