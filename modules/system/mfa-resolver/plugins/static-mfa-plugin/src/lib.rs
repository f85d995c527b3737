#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Multifactor Resolver Plugin
//!
//! Supplies the multifactor resolver with providers, provider groups and
//! registered services taken from configuration. Intended for development,
//! tests and small fixed deployments.
//!
//! ## Configuration
//!
//! ```yaml
//! providers:
//!   - id: mfa-duo
//!     rank: 10
//!   - id: mfa-gauth
//!     rank: 5
//!     unavailable_for: [legacy-portal]
//! groups:
//!   - id: any-otp
//!     members: [mfa-gauth, mfa-duo]
//! services:
//!   - id: 1
//!     name: payroll
//!     service_id: "https://payroll\\.example\\.org/.*"
//!     multifactor_policy:
//!       providers: [any-otp]
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use module::StaticMfaPlugin;
