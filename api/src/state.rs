//! Application state shared by every worker

use std::sync::Arc;

use ag_core::repositories::RevocationStore;
use ag_core::services::{CredentialValidator, TokenService};
use ag_shared::AppConfig;

/// Everything a handler needs, built once in `main`
pub struct AppState<S, V>
where
    S: RevocationStore,
    V: CredentialValidator,
{
    pub token_service: Arc<TokenService<S>>,
    pub validator: Arc<V>,
    pub config: Arc<AppConfig>,
}

impl<S, V> AppState<S, V>
where
    S: RevocationStore,
    V: CredentialValidator,
{
    pub fn new(
        token_service: Arc<TokenService<S>>,
        validator: Arc<V>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            token_service,
            validator,
            config,
        }
    }
}
