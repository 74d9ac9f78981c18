//! Audit sink trait defining where audit events go.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditEvent;
use crate::errors::DomainError;

/// Destination for audit events
///
/// Recording must never block or fail the request that produced the
/// event; callers log a failed `record` and carry on.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record a single event
    async fn record(&self, event: &AuditEvent) -> Result<(), DomainError>;
}
