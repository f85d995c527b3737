#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Multifactor Resolver SDK
//!
//! This crate provides the public API for the `mfa_resolver` module:
//!
//! - [`EventResolver`] - One link of the resolver chain
//! - [`MultifactorProvider`], [`ProviderRegistry`] - Provider capabilities
//! - [`ProviderSelector`] - Pluggable provider selection strategy
//! - [`AuditSink`], [`AuditRecord`] - Audit obligation for decisions
//! - [`RequestContext`], [`RegisteredService`], [`MultifactorPolicy`] - Inputs
//! - [`ResolutionOutcome`], [`TransitionEvent`] - Outputs
//! - [`MfaResolverError`] - Error types
//!
//! ## Usage
//!
//! The flow layer builds a [`RequestContext`] per request and asks the chain:
//!
//! ```ignore
//! use mfa_resolver_sdk::{EventResolver, RequestContext, ResolutionOutcome};
//!
//! let mut ctx = RequestContext::builder()
//!     .service(service)
//!     .principal(principal)
//!     .build();
//!
//! match chain.resolve(&mut ctx).await? {
//!     ResolutionOutcome::Decided(event) => { /* transition to event.id() */ }
//!     ResolutionOutcome::Denied(reason) => { /* render reason */ }
//!     ResolutionOutcome::NoOpinion => { /* proceed without multifactor */ }
//! }
//! ```

pub mod api;
pub mod audit;
pub mod error;
pub mod models;
pub mod provider;
pub mod selector;

// Re-export main types at crate root
pub use api::EventResolver;
pub use audit::{AUDIT_ACTION_MFA_DECISION, AuditError, AuditRecord, AuditSink};
pub use error::{MfaResolverError, ProviderError, SelectionError};
pub use models::{
    DenyReason, FailureMode, MultifactorPolicy, RESOLVED_EVENT_ATTRIBUTE, RegisteredService,
    RequestContext, RequestContextBuilder, ResolutionOutcome, TransitionEvent,
};
pub use provider::{MultifactorProvider, ProviderEntry, ProviderRegistry, ProviderSet};
pub use selector::ProviderSelector;
