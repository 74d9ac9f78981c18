use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ag_api::{create_app, AppState};
use ag_core::repositories::TracingAuditSink;
use ag_core::services::{KeySet, TokenCodec, TokenService, TokenServiceConfig};
use ag_infra::{RedisRevocationStore, UserServiceClient};
use ag_shared::config::{LogFormat, LoggingConfig};
use ag_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            tracing::error!(error = %e, "Refusing to start");
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        bind = %config.server.bind_address(),
        workers = config.server.workers,
        "Starting authentication gateway"
    );

    let store = RedisRevocationStore::connect(&config.revocation_store)
        .await
        .context("failed to connect to the revocation store")?;
    let validator =
        UserServiceClient::new(&config.upstream).context("failed to build the user service client")?;

    let keys = KeySet::from_config(&config.jwt.signing_keys)?;
    tracing::info!(signing_kid = keys.signing_key().kid(), "Signing keys loaded");
    let codec = TokenCodec::new(keys, config.jwt.issuer.clone(), config.jwt.audience.clone())
        .with_clock_skew(config.jwt.clock_skew_secs);
    let token_service = TokenService::new(
        codec,
        Arc::new(store),
        Arc::new(TracingAuditSink::new()),
        TokenServiceConfig::from_app_config(&config),
    );

    let server = config.server.clone();
    let state = web::Data::new(AppState::new(
        Arc::new(token_service),
        Arc::new(validator),
        Arc::new(config),
    ));

    HttpServer::new(move || create_app(state.clone()))
        .workers(server.workers)
        .keep_alive(Duration::from_secs(server.keep_alive_secs))
        .shutdown_timeout(server.shutdown_timeout_secs)
        .bind(server.bind_address())?
        .run()
        .await?;

    tracing::info!("Authentication gateway stopped");
    Ok(())
}

/// `RUST_LOG` overrides the configured level when set
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}
