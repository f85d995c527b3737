//! Audit sink that writes decisions to the tracing audit target.

use async_trait::async_trait;
use mfa_resolver_sdk::{AuditError, AuditRecord, AuditSink};

/// Emits each record as an `info!` event on the `audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        tracing::info!(
            target: "audit",
            action = %record.action,
            principal = %record.principal,
            service = %record.service,
            provider = %record.provider,
            recorded_at = %record.recorded_at,
            "security decision recorded"
        );
        Ok(())
    }
}
