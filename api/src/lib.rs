//! HTTP surface of the authentication gateway
//!
//! Exposed as a library so the integration tests can build the same
//! application the binary serves.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::AppState;
