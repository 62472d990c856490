//! Payment webhook service entrypoint.
//!
//! Wires the Postgres adapters, the Resend mailer, and the HTTP router
//! together from environment configuration, then serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use payments_webhook::adapters::email::ResendMailer;
use payments_webhook::adapters::http::{app_router, PaymentsAppState};
use payments_webhook::adapters::postgres::{
    PostgresCustomerDirectory, PostgresPaymentLogStore, PostgresSubscriptionStore,
};
use payments_webhook::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting {}",
        config.server.service_name
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let state = PaymentsAppState::new(
        Arc::new(PostgresCustomerDirectory::new(pool.clone())),
        Arc::new(PostgresPaymentLogStore::new(pool.clone())),
        Arc::new(PostgresSubscriptionStore::new(pool.clone())),
        Arc::new(ResendMailer::new(config.email.clone())),
        config.gateway.clone(),
        config.server.service_name.clone(),
    );

    let cors = build_cors_layer(&config.server.cors_origins_list());
    let app = app_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .with_state(state);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Allow the configured origins, or any origin when none are configured.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
