//! Audit sink module.

mod r#trait;
pub use r#trait::AuditSink;

mod tracing_sink;
pub use tracing_sink::TracingAuditSink;

mod mock;
pub use mock::InMemoryAuditSink;

#[cfg(test)]
mod tests;
