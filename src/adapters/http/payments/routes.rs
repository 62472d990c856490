//! Axum router configuration for the payments endpoints.
//!
//! This module defines the route structure the gateway is configured
//! against and wires each route to its handler.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{handle_gateway_webhook, health_check, service_root, PaymentsAppState};

/// Create the payments API router.
///
/// # Routes
///
/// - `POST /webhook` - Gateway payment callback (bearer-checked)
/// - `GET /health` - Health probe
pub fn payments_routes() -> Router<PaymentsAppState> {
    Router::new()
        .route("/webhook", post(handle_gateway_webhook))
        .route("/health", get(health_check))
}

/// Create the complete application router.
///
/// Mounts the payments routes under `/api/payments` and the plain-text
/// liveness line at `/`, which is what the gateway callbacks and the
/// smoke scripts are pointed at.
///
/// # Example
///
/// ```ignore
/// let app = app_router().with_state(state);
/// axum::serve(listener, app).await?;
/// ```
pub fn app_router() -> Router<PaymentsAppState> {
    Router::new()
        .route("/", get(service_root))
        .nest("/api/payments", payments_routes())
}
