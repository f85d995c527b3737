//! Multifactor Resolver Module
//!
//! Decides which additional authentication step, if any, a request must take
//! next. The decision is made by a chain of resolvers sharing the
//! [`mfa_resolver_sdk::EventResolver`] contract; the first resolver with an
//! opinion wins.
//!
//! The registered-service policy resolver composes a policy gate, provider
//! flattening, an injected provider selector, an availability check and an
//! audit emission into a single decision.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use module::MfaResolverModule;
