//! Domain models for the multifactor resolver module.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sso_security::Principal;

/// Context attribute under which the decided [`TransitionEvent`] is stored.
pub const RESOLVED_EVENT_ATTRIBUTE: &str = "mfa.resolved_event";

/// What to do when the selected provider cannot be reached.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Deny the request (default).
    #[default]
    Closed,
    /// Continue without multifactor for this service.
    Bypass,
}

/// Per-service multifactor rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MultifactorPolicy {
    /// Provider (or provider-group) identifiers that may satisfy the policy.
    pub providers: BTreeSet<String>,
    /// Principal attribute name(s) that make the policy conditional.
    /// Several names may be given separated by commas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_attribute_name_trigger: Option<String>,
    /// Regex the trigger attribute value must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_attribute_value_to_match: Option<String>,
    /// Behaviour when the selected provider is unavailable.
    pub failure_mode: FailureMode,
}

impl MultifactorPolicy {
    /// Policy requiring one of the given providers, without triggers.
    #[must_use]
    pub fn with_providers<I, S>(providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            providers: providers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Non-blank attribute-name trigger, trimmed.
    #[must_use]
    pub fn attribute_name_trigger(&self) -> Option<&str> {
        non_blank(self.principal_attribute_name_trigger.as_deref())
    }

    /// Non-blank attribute-value trigger, trimmed.
    #[must_use]
    pub fn attribute_value_to_match(&self) -> Option<&str> {
        non_blank(self.principal_attribute_value_to_match.as_deref())
    }

    /// A policy is conditional when either trigger field is non-blank.
    #[must_use]
    pub fn is_conditional(&self) -> bool {
        self.attribute_name_trigger().is_some() || self.attribute_value_to_match().is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A consumer application known to the SSO server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RegisteredService {
    /// Numeric registry identifier.
    pub id: i64,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Service-matching pattern (a regex over service URLs).
    pub service_id: String,
    /// Multifactor rule; `None` means the service never requires it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multifactor_policy: Option<MultifactorPolicy>,
}

impl RegisteredService {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, service_id: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            service_id: service_id.into(),
            multifactor_policy: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: MultifactorPolicy) -> Self {
        self.multifactor_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn policy(&self) -> Option<&MultifactorPolicy> {
        self.multifactor_policy.as_ref()
    }
}

/// Decision output naming the next authentication step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionEvent {
    id: String,
    attributes: BTreeMap<String, String>,
}

impl TransitionEvent {
    pub const ATTR_PRINCIPAL: &'static str = "principal";
    pub const ATTR_SERVICE: &'static str = "service";
    pub const ATTR_PROVIDER: &'static str = "provider";

    /// Build the event for a provider decision, recording the audit triple.
    #[must_use]
    pub fn for_provider(
        principal: &Principal,
        service: &RegisteredService,
        provider_id: &str,
    ) -> Self {
        let attributes = BTreeMap::from([
            (Self::ATTR_PRINCIPAL.to_owned(), principal.id().to_owned()),
            (Self::ATTR_SERVICE.to_owned(), service.service_id.clone()),
            (Self::ATTR_PROVIDER.to_owned(), provider_id.to_owned()),
        ]);
        Self {
            id: provider_id.to_owned(),
            attributes,
        }
    }

    /// Event identifier (the provider identifier for multifactor decisions).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn principal(&self) -> Option<&str> {
        self.attribute(Self::ATTR_PRINCIPAL)
    }

    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.attribute(Self::ATTR_SERVICE)
    }

    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.attribute(Self::ATTR_PROVIDER)
    }
}

/// Reason shown to the user when a policy applies but cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The selected provider reported itself unavailable for the service.
    ProviderUnreachable { provider_id: String },
}

impl DenyReason {
    /// Machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProviderUnreachable { .. } => "provider_unreachable",
        }
    }
}

impl fmt::Display for DenyReason {
    // Rendered to end users: keep it free of identifiers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderUnreachable { .. } => f.write_str("provider unreachable"),
        }
    }
}

/// Outcome of one resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The resolver does not apply; the chain continues.
    NoOpinion,
    /// Multifactor is required through the event's provider.
    Decided(TransitionEvent),
    /// Multifactor is required but cannot be satisfied. Terminal.
    Denied(DenyReason),
}

impl ResolutionOutcome {
    #[must_use]
    pub fn is_no_opinion(&self) -> bool {
        matches!(self, Self::NoOpinion)
    }

    #[must_use]
    pub fn event(&self) -> Option<&TransitionEvent> {
        match self {
            Self::Decided(event) => Some(event),
            Self::NoOpinion | Self::Denied(_) => None,
        }
    }
}

/// Per-request carrier owned by the flow layer.
///
/// Holds the resolved target service, the authenticated principal and an
/// attribute bag. Resolvers read the first two and write decision outputs
/// into the bag.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    service: Option<Arc<RegisteredService>>,
    principal: Option<Arc<Principal>>,
    parameters: BTreeMap<String, String>,
    transitions: Option<BTreeSet<String>>,
    attributes: BTreeMap<String, serde_json::Value>,
}

impl RequestContext {
    #[must_use]
    pub fn builder() -> RequestContextBuilder {
        RequestContextBuilder::default()
    }

    #[must_use]
    pub fn service(&self) -> Option<&Arc<RegisteredService>> {
        self.service.as_ref()
    }

    #[must_use]
    pub fn principal(&self) -> Option<&Arc<Principal>> {
        self.principal.as_ref()
    }

    /// Inbound request parameter.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Whether the flow can transition on `event_id`.
    ///
    /// A context that declares no transitions accepts every id.
    #[must_use]
    pub fn accepts_transition(&self, event_id: &str) -> bool {
        self.transitions
            .as_ref()
            .is_none_or(|known| known.contains(event_id))
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    pub fn put_attribute(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.attributes.insert(name.into(), value);
    }

    /// The event stored by the last `Decided` outcome, if any.
    #[must_use]
    pub fn resolved_event(&self) -> Option<TransitionEvent> {
        self.attribute(RESOLVED_EVENT_ATTRIBUTE)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

#[derive(Default)]
pub struct RequestContextBuilder {
    service: Option<Arc<RegisteredService>>,
    principal: Option<Arc<Principal>>,
    parameters: BTreeMap<String, String>,
    transitions: Option<BTreeSet<String>>,
}

impl RequestContextBuilder {
    #[must_use]
    pub fn service(mut self, service: impl Into<Arc<RegisteredService>>) -> Self {
        self.service = Some(service.into());
        self
    }

    #[must_use]
    pub fn principal(mut self, principal: impl Into<Arc<Principal>>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    #[must_use]
    pub fn parameter(mut self, name: &str, value: &str) -> Self {
        self.parameters.insert(name.to_owned(), value.to_owned());
        self
    }

    /// Declare the event ids the flow can transition on.
    #[must_use]
    pub fn transitions<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transitions = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn build(self) -> RequestContext {
        RequestContext {
            service: self.service,
            principal: self.principal,
            parameters: self.parameters,
            transitions: self.transitions,
            attributes: BTreeMap::new(),
        }
    }
}
