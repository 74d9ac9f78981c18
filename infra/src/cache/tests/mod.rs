//! Unit tests for the Redis client and revocation key layout

use redis::{ErrorKind, RedisError};

use crate::cache::redis_client::{is_retriable_error, RedisClient};
use crate::cache::revocation_store::revocation_key;
use crate::InfrastructureError;

#[test]
fn test_revocation_key_layout() {
    assert_eq!(
        revocation_key("authgw", "token", "abc"),
        "authgw:revoked:token:abc"
    );
    assert_eq!(
        revocation_key("authgw", "session", "s-1"),
        "authgw:revoked:session:s-1"
    );
}

#[test]
fn test_is_retriable_error() {
    // IO errors should be retriable
    let io_error = RedisError::from(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Connection refused",
    ));
    assert!(is_retriable_error(&io_error));

    // Type errors should not be retriable
    let type_error = RedisError::from((ErrorKind::TypeError, "Invalid type"));
    assert!(!is_retriable_error(&type_error));
}

#[tokio::test]
async fn test_client_creation_with_invalid_url() {
    let result = RedisClient::new("invalid://url").await;
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}
