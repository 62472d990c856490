//! HTTP adapter for the payments endpoints.
//!
//! Exposes the webhook ingestion surface the gateway is configured against:
//! - `POST /api/payments/webhook` - Gateway payment callback
//! - `GET /api/payments/health` - Health probe
//! - `GET /` - Plain-text liveness line

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::{PaymentsApiError, PaymentsAppState};
pub use routes::{app_router, payments_routes};
