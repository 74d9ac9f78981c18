//! Audit sink that writes to the `audit` tracing target.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditEvent;
use crate::errors::DomainError;

use super::AuditSink;

/// Emits every event as a structured tracing event on the `audit` target
///
/// Security events are emitted at `warn`, everything else at `info`, so a
/// subscriber filter such as `audit=warn` keeps only the security trail.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, event: &AuditEvent) -> Result<(), DomainError> {
        let subject = event.subject.as_deref().unwrap_or("-");
        let session_id = event.session_id.as_deref().unwrap_or("-");
        let token_id = event.token_id.as_deref().unwrap_or("-");
        let reason = event.reason.as_deref().unwrap_or("-");

        if event.event_type.is_security_event() {
            tracing::warn!(
                target: "audit",
                event_id = %event.id,
                event_type = event.event_type.as_str(),
                subject,
                session_id,
                token_id,
                reason,
                "Security event"
            );
        } else {
            tracing::info!(
                target: "audit",
                event_id = %event.id,
                event_type = event.event_type.as_str(),
                subject,
                session_id,
                token_id,
                reason,
                "Audit event"
            );
        }
        Ok(())
    }
}
