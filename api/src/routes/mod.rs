//! Route handlers grouped by concern

pub mod auth;
pub mod system;
