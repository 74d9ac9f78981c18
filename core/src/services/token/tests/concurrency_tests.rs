//! Concurrent refresh with the same token

use std::sync::Arc;

use tokio::sync::Barrier;

use super::{service_with, test_config};
use crate::errors::{DomainError, TokenError};
use crate::repositories::InMemoryRevocationStore;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_refresh_has_exactly_one_winner() {
    for _ in 0..20 {
        let (service, _) = service_with(Arc::new(InMemoryRevocationStore::new()), test_config());
        let service = Arc::new(service);
        let issued = service.issue_session("user-1").await.unwrap();
        let barrier = Arc::new(Barrier::new(2));

        let mut handles = Vec::new();
        for _ in 0..2 {
            let service = service.clone();
            let barrier = barrier.clone();
            let token = issued.tokens.refresh_token.clone();
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                service.refresh(&token).await
            }));
        }

        let mut successes = 0;
        let mut reuses = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(DomainError::Token(TokenError::TokenReuse)) => reuses += 1,
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(reuses, 1);
    }
}
