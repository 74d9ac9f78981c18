//! Health, version and configuration introspection endpoints

pub mod debug;
pub mod health;
pub mod info;

pub use debug::debug_tokens;
pub use health::health;
pub use info::{public_config, version};
