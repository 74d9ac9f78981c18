//! External identity service integration.

pub mod user_service;

pub use user_service::UserServiceClient;
