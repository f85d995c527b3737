//! Credential Resolver SDK
//!
//! Public API for primary (username/password) credential validation:
//!
//! - [`CredentialValidator`] - Validation capability implemented by plugins
//! - [`Credential`] - Username and secret password
//! - [`AuthFailure`] - Classified validation failures
//!
//! A successful validation yields the [`sso_security::Principal`] that the
//! multifactor resolver later reads.

pub mod api;
pub mod error;
pub mod models;

pub use api::CredentialValidator;
pub use error::AuthFailure;
pub use models::Credential;
