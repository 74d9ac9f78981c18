use crate::domain::entities::audit::{AuditEvent, AuditEventType};
use crate::repositories::audit::{AuditSink, InMemoryAuditSink, TracingAuditSink};

#[tokio::test]
async fn test_in_memory_sink_collects_events() {
    let sink = InMemoryAuditSink::new();

    sink.record(&AuditEvent::new(AuditEventType::SessionIssued).with_subject("u1"))
        .await
        .unwrap();
    sink.record(&AuditEvent::new(AuditEventType::TokenReuseDetected).with_session("s1"))
        .await
        .unwrap();

    assert_eq!(sink.events().len(), 2);
    let reuse = sink.events_of(AuditEventType::TokenReuseDetected);
    assert_eq!(reuse.len(), 1);
    assert_eq!(reuse[0].session_id.as_deref(), Some("s1"));

    sink.clear();
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_in_memory_sink_failure() {
    let sink = InMemoryAuditSink::new();
    sink.set_should_fail(true);

    assert!(sink
        .record(&AuditEvent::new(AuditEventType::Logout))
        .await
        .is_err());
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_tracing_sink_accepts_all_event_types() {
    let sink = TracingAuditSink::new();
    for event_type in [
        AuditEventType::SessionIssued,
        AuditEventType::TokenRefreshed,
        AuditEventType::TokenReuseDetected,
        AuditEventType::SessionRevoked,
        AuditEventType::Logout,
    ] {
        assert!(sink.record(&AuditEvent::new(event_type)).await.is_ok());
    }
}
