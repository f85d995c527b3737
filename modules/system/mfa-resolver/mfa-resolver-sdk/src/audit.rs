//! Audit obligation for multifactor decisions.
//!
//! Every `Decided` outcome produces exactly one [`AuditRecord`]. Sinks may
//! fail; the resolver reports sink failures through logging and never lets
//! them change the authentication decision.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use crate::models::TransitionEvent;

/// Action name recorded for multifactor decisions.
pub const AUDIT_ACTION_MFA_DECISION: &str = "multifactor-authentication-decision";

/// One security-relevant decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditRecord {
    pub action: String,
    pub principal: String,
    pub service: String,
    pub provider: String,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl AuditRecord {
    /// Build the decision record from a transition event.
    ///
    /// Returns `None` if the event lacks any of the principal, service or
    /// provider attributes.
    #[must_use]
    pub fn from_event(event: &TransitionEvent) -> Option<Self> {
        Some(Self {
            action: AUDIT_ACTION_MFA_DECISION.to_owned(),
            principal: event.principal()?.to_owned(),
            service: event.service()?.to_owned(),
            provider: event.provider()?.to_owned(),
            recorded_at: OffsetDateTime::now_utc(),
        })
    }

    /// The `(principal, service, provider)` triple.
    #[must_use]
    pub fn triple(&self) -> (&str, &str, &str) {
        (&self.principal, &self.service, &self.provider)
    }
}

/// Failure writing an audit record.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),

    #[error("audit record rejected: {0}")]
    Rejected(String),
}

/// Destination for audit records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persist or forward one record.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if the sink cannot be reached
    /// - `Rejected` if the sink refuses the record
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError>;
}
