use async_trait::async_trait;
use sso_security::Principal;

use crate::error::AuthFailure;
use crate::models::Credential;

/// Primary credential validation.
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    /// Validate `credential` and produce the authenticated principal.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no account matches
    /// - `BackendUnavailable` if the credential store cannot be queried
    /// - `Misconfigured` if the validator configuration is invalid
    async fn validate(&self, credential: &Credential) -> Result<Principal, AuthFailure>;
}
