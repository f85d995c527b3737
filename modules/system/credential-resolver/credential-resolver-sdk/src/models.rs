//! Domain models for the credential resolver module.

use secrecy::SecretString;
use serde::Deserialize;

/// Username/password credential presented at login.
///
/// The password is held as a [`SecretString`] and never appears in `Debug`
/// output.
#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: SecretString,
}

impl Credential {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}
