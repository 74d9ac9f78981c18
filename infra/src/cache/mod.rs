//! Cache module for Redis-backed state
//!
//! This module provides the Redis client and the revocation store built
//! on top of it.

pub mod redis_client;
pub mod revocation_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;
