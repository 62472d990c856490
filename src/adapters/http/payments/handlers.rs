//! HTTP handlers for the payments endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.
//! The webhook route extracts raw headers and bytes instead of typed JSON so
//! the bearer check can run before any payload parsing.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::payments::{IngestWebhookCommand, IngestWebhookHandler};
use crate::config::GatewayConfig;
use crate::domain::foundation::Timestamp;
use crate::domain::payment::{PaymentEvent, PaymentOutcome, WebhookError};
use crate::ports::{CustomerDirectory, EmailSender, PaymentLogStore, SubscriptionStore};

use super::dto::{DatabaseErrorResponse, HealthResponse, WebhookRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; holds Arc-wrapped ports plus the two pieces of
/// configuration the handlers read directly.
#[derive(Clone)]
pub struct PaymentsAppState {
    pub customer_directory: Arc<dyn CustomerDirectory>,
    pub payment_log: Arc<dyn PaymentLogStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub email_sender: Arc<dyn EmailSender>,
    pub gateway: GatewayConfig,
    pub service_name: String,
}

impl PaymentsAppState {
    pub fn new(
        customer_directory: Arc<dyn CustomerDirectory>,
        payment_log: Arc<dyn PaymentLogStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        email_sender: Arc<dyn EmailSender>,
        gateway: GatewayConfig,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            customer_directory,
            payment_log,
            subscriptions,
            email_sender,
            gateway,
            service_name: service_name.into(),
        }
    }

    /// Create the ingestion handler on demand from the shared state.
    pub fn ingest_webhook_handler(&self) -> IngestWebhookHandler {
        IngestWebhookHandler::new(
            self.customer_directory.clone(),
            self.payment_log.clone(),
            self.subscriptions.clone(),
            self.email_sender.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payments/webhook - Ingest one gateway payment callback
///
/// Response contract expected by the gateway's retry policy:
/// - 200 `Payment completed` for the approved status
/// - 201 `Received` for any other validly-logged status
/// - 400 `Invalid payload` when the body fails structural validation
/// - 401 `Unauthorized` when the configured bearer token does not match
/// - 500 on audit log failure (JSON) or anything unexpected (plain text)
pub async fn handle_gateway_webhook(
    State(state): State<PaymentsAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, PaymentsApiError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if !state.gateway.authorizes(authorization) {
        tracing::warn!("Unauthorized access attempt to payment webhook");
        return Err(WebhookError::Unauthorized.into());
    }

    let event = parse_event(&body)?;

    let handler = state.ingest_webhook_handler();
    let result = handler.handle(IngestWebhookCommand { event }).await?;

    Ok(match result.outcome {
        PaymentOutcome::Approved => (StatusCode::OK, "Payment completed").into_response(),
        PaymentOutcome::NotApproved => (StatusCode::CREATED, "Received").into_response(),
    })
}

/// Parse and validate the raw webhook body into a domain event.
fn parse_event(body: &[u8]) -> Result<PaymentEvent, WebhookError> {
    let raw: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| WebhookError::invalid_payload(format!("Malformed JSON: {}", e)))?;
    let request: WebhookRequest = serde_json::from_value(raw.clone())
        .map_err(|e| WebhookError::invalid_payload(format!("Malformed payload: {}", e)))?;
    request.into_event(raw)
}

/// GET /api/payments/health - Service health probe
pub async fn health_check(State(state): State<PaymentsAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK".to_string(),
        service: state.service_name.clone(),
        timestamp: Timestamp::now().to_rfc3339(),
    })
}

/// GET / - Plain-text liveness line used by smoke scripts
pub async fn service_root() -> &'static str {
    "Payment Webhook Service is running"
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts pipeline errors to gateway-facing responses.
///
/// The gateway keys its retry policy off the status code and its operators
/// read the plain-text bodies, so both are part of the wire contract.
#[derive(Debug)]
pub struct PaymentsApiError(WebhookError);

impl From<WebhookError> for PaymentsApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentsApiError {
    fn into_response(self) -> Response {
        match self.0 {
            WebhookError::InvalidPayload { reason } => {
                tracing::debug!("Rejected webhook payload: {}", reason);
                (StatusCode::BAD_REQUEST, "Invalid payload").into_response()
            }
            WebhookError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            WebhookError::Database { message, details } => {
                tracing::error!("Payment log write failed: {}", details);
                let body = DatabaseErrorResponse {
                    error: message,
                    details,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            WebhookError::Notification { message } | WebhookError::Internal { message } => {
                tracing::error!("Error processing webhook: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
