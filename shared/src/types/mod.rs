//! Type definitions shared by the HTTP surface
//!
//! - `response` - health check wrappers

pub mod response;

pub use response::{HealthResponse, HealthStatus, ServiceHealth};
