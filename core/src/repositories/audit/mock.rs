//! In-memory audit sink for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::audit::{AuditEvent, AuditEventType};
use crate::errors::DomainError;

use super::AuditSink;

/// Collects events in memory so tests can assert on the audit trail
#[derive(Debug, Default, Clone)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether `record` should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        if let Ok(mut flag) = self.should_fail.lock() {
            *flag = should_fail;
        }
    }

    /// All recorded events, oldest first
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Recorded events of one type
    pub fn events_of(&self, event_type: AuditEventType) -> Vec<AuditEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn record(&self, event: &AuditEvent) -> Result<(), DomainError> {
        let should_fail = self.should_fail.lock().map(|f| *f).unwrap_or(false);
        if should_fail {
            return Err(DomainError::Internal {
                message: "Mock audit sink error".to_string(),
            });
        }

        self.events
            .lock()
            .map_err(|_| DomainError::Internal {
                message: "Audit sink lock poisoned".to_string(),
            })?
            .push(event.clone());
        Ok(())
    }
}
