pub mod auth;
pub mod cors;
pub mod security;

pub use auth::*;
pub use cors::*;
pub use security::*;
