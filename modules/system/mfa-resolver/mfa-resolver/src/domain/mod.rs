//! Domain layer for the multifactor resolver.

pub mod attribute_trigger;
pub mod audit;
pub mod chain;
pub mod decision;
pub mod error;
pub mod flatten;
pub mod policy_gate;
pub mod request_parameter;
pub mod selector;
pub mod service;

#[cfg(test)]
mod test_support;

pub use attribute_trigger::PrincipalAttributeTriggerResolver;
pub use audit::TracingAuditSink;
pub use chain::ResolverChain;
pub use decision::DecisionPipeline;
pub use error::DomainError;
pub use request_parameter::RequestParameterResolver;
pub use selector::{FirstProviderSelector, PrincipalAttributeProviderSelector, RankedProviderSelector};
pub use service::RegisteredServicePolicyResolver;
