//! Storage-facing interfaces and their in-process implementations.

pub mod audit;
pub mod revocation;

pub use audit::{AuditSink, InMemoryAuditSink, TracingAuditSink};
pub use revocation::{InMemoryRevocationStore, MockRevocationStore, RevocationStore};
