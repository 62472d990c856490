//! Integration tests for the payment webhook HTTP surface.
//!
//! Drives the full router through `tower::ServiceExt::oneshot` against
//! in-memory port implementations, covering:
//! 1. The gateway response contract (status codes and plain-text bodies)
//! 2. Bearer authorization, including the check-before-parse ordering
//! 3. Audit log writes and customer resolution
//! 4. Installment plan progression and the notices it triggers

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use secrecy::SecretString;
use serde_json::json;
use tower::ServiceExt;

use payments_webhook::adapters::http::{app_router, PaymentsAppState};
use payments_webhook::config::GatewayConfig;
use payments_webhook::domain::foundation::{CustomerId, DomainError, SubscriptionId};
use payments_webhook::domain::payment::PaymentLogEntry;
use payments_webhook::domain::subscription::{Subscription, SubscriptionStatus};
use payments_webhook::ports::{
    CustomerDirectory, EmailSender, PaymentLogStore, PaymentResultNotice, SubscriptionStore,
    WelcomeNotice,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// In-memory customer directory keyed by contact details.
#[derive(Default)]
struct MockDirectory {
    by_email: Mutex<HashMap<String, CustomerId>>,
    by_phone: Mutex<HashMap<String, CustomerId>>,
}

#[async_trait]
impl CustomerDirectory for MockDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerId>, DomainError> {
        Ok(self.by_email.lock().unwrap().get(email).copied())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<CustomerId>, DomainError> {
        Ok(self.by_phone.lock().unwrap().get(phone).copied())
    }
}

/// Append-only log capture.
#[derive(Default)]
struct MockLog {
    entries: Mutex<Vec<PaymentLogEntry>>,
}

#[async_trait]
impl PaymentLogStore for MockLog {
    async fn append(&self, entry: &PaymentLogEntry) -> Result<(), DomainError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

/// Single-plan subscription store that records every update.
#[derive(Default)]
struct MockPlans {
    open: Mutex<Option<Subscription>>,
    updates: Mutex<Vec<Subscription>>,
}

#[async_trait]
impl SubscriptionStore for MockPlans {
    async fn find_open_by_identification(
        &self,
        identification: &str,
    ) -> Result<Option<Subscription>, DomainError> {
        Ok(self
            .open
            .lock()
            .unwrap()
            .clone()
            .filter(|plan| plan.identification == identification && plan.status.is_open()))
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.updates.lock().unwrap().push(subscription.clone());
        *self.open.lock().unwrap() = Some(subscription.clone());
        Ok(())
    }
}

/// Email capture; never fails.
#[derive(Default)]
struct MockMailer {
    results: Mutex<Vec<PaymentResultNotice>>,
    welcomes: Mutex<Vec<WelcomeNotice>>,
}

#[async_trait]
impl EmailSender for MockMailer {
    async fn send_payment_result(&self, notice: &PaymentResultNotice) -> Result<(), DomainError> {
        self.results.lock().unwrap().push(notice.clone());
        Ok(())
    }

    async fn send_welcome(&self, notice: &WelcomeNotice) -> Result<(), DomainError> {
        self.welcomes.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

struct TestHarness {
    directory: Arc<MockDirectory>,
    log: Arc<MockLog>,
    plans: Arc<MockPlans>,
    mailer: Arc<MockMailer>,
    state: PaymentsAppState,
}

fn harness(gateway: GatewayConfig) -> TestHarness {
    let directory = Arc::new(MockDirectory::default());
    let log = Arc::new(MockLog::default());
    let plans = Arc::new(MockPlans::default());
    let mailer = Arc::new(MockMailer::default());

    let state = PaymentsAppState::new(
        directory.clone(),
        log.clone(),
        plans.clone(),
        mailer.clone(),
        gateway,
        "Payment Webhook Service",
    );

    TestHarness {
        directory,
        log,
        plans,
        mailer,
        state,
    }
}

fn secured_gateway() -> GatewayConfig {
    GatewayConfig {
        shared_secret: Some(SecretString::new("gw_token".to_string())),
    }
}

fn webhook_request(body: String, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/payments/webhook")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

fn approved_payload() -> serde_json::Value {
    json!({
        "id": 98765,
        "externalorder": "ORD-1001",
        "amount": 50000.0,
        "fullname": "Ana Gomez",
        "idstatus": {"id": 34, "nombre": "Aprobada"},
        "idperson": {
            "email": "ana@example.com",
            "phone": "3001234567",
            "firstname": "Ana",
            "lastname": "Gomez",
            "identification": "123456789"
        },
        "paymentmethod": {"id": 1, "nombre": "PSE"},
        "ip": "10.0.0.1"
    })
}

fn declined_payload() -> serde_json::Value {
    let mut payload = approved_payload();
    payload["idstatus"] = json!({"id": 23, "nombre": "Rechazada"});
    payload
}

async fn send(harness: &TestHarness, request: Request<Body>) -> (StatusCode, String) {
    let app = app_router().with_state(harness.state.clone());
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Let spawned notification tasks run to completion.
async fn drain_spawned_tasks() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

// =============================================================================
// Response Contract
// =============================================================================

#[tokio::test]
async fn approved_payment_is_acknowledged_and_logged() {
    let harness = harness(GatewayConfig::default());
    let customer = CustomerId::new();
    harness
        .directory
        .by_email
        .lock()
        .unwrap()
        .insert("ana@example.com".to_string(), customer);

    let (status, body) = send(
        &harness,
        webhook_request(approved_payload().to_string(), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Payment completed");

    let entries = harness.log.entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].order_id, "ORD-1001");
    assert_eq!(entries[0].status_id, 34);
    assert_eq!(entries[0].customer_id, Some(customer));
}

#[tokio::test]
async fn declined_payment_returns_received() {
    let harness = harness(GatewayConfig::default());

    let (status, body) = send(
        &harness,
        webhook_request(declined_payload().to_string(), None),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "Received");
    assert_eq!(harness.log.entries.lock().unwrap().len(), 1);
    assert!(harness.plans.updates.lock().unwrap().is_empty());

    drain_spawned_tasks().await;
    let results = harness.mailer.results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert!(!results[0].approved);
    assert!(harness.mailer.welcomes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_body_is_rejected_without_side_effects() {
    let harness = harness(GatewayConfig::default());

    let (status, body) = send(&harness, webhook_request("not-json".to_string(), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid payload");
    assert!(harness.log.entries.lock().unwrap().is_empty());
    assert!(harness.mailer.results.lock().unwrap().is_empty());
}

#[tokio::test]
async fn payload_missing_status_is_rejected() {
    let harness = harness(GatewayConfig::default());
    let mut payload = approved_payload();
    payload.as_object_mut().unwrap().remove("idstatus");

    let (status, body) = send(&harness, webhook_request(payload.to_string(), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid payload");
    assert!(harness.log.entries.lock().unwrap().is_empty());
}

// =============================================================================
// Authorization
// =============================================================================

#[tokio::test]
async fn request_without_token_is_unauthorized() {
    let harness = harness(secured_gateway());

    let (status, body) = send(
        &harness,
        webhook_request(approved_payload().to_string(), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Unauthorized");
    assert!(harness.log.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn request_with_wrong_token_is_unauthorized() {
    let harness = harness(secured_gateway());

    let (status, _) = send(
        &harness,
        webhook_request(approved_payload().to_string(), Some("other_token")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn request_with_valid_token_is_accepted() {
    let harness = harness(secured_gateway());

    let (status, _) = send(
        &harness,
        webhook_request(approved_payload().to_string(), Some("gw_token")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn authorization_is_checked_before_body_parsing() {
    let harness = harness(secured_gateway());

    let (status, _) = send(&harness, webhook_request("not-json".to_string(), None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unsecured_gateway_accepts_anonymous_requests() {
    let harness = harness(GatewayConfig::default());

    let (status, _) = send(
        &harness,
        webhook_request(approved_payload().to_string(), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Plan Progression and Notices
// =============================================================================

#[tokio::test]
async fn first_approved_installment_activates_plan_and_sends_welcome() {
    let harness = harness(GatewayConfig::default());
    *harness.plans.open.lock().unwrap() =
        Some(Subscription::create(SubscriptionId::new(), "123456789", 3).unwrap());

    let (status, _) = send(
        &harness,
        webhook_request(approved_payload().to_string(), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    drain_spawned_tasks().await;

    let updates = harness.plans.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].installments_paid, 1);
    assert_eq!(updates[0].status, SubscriptionStatus::Active);

    let welcomes = harness.mailer.welcomes.lock().unwrap();
    assert_eq!(welcomes.len(), 1);
    assert_eq!(welcomes[0].order_id, "ORD-1001");
    assert_eq!(welcomes[0].to, "ana@example.com");

    let results = harness.mailer.results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].approved);
}

#[tokio::test]
async fn later_installments_advance_without_welcome() {
    let harness = harness(GatewayConfig::default());
    let mut plan = Subscription::create(SubscriptionId::new(), "123456789", 3).unwrap();
    plan.installments_paid = 1;
    plan.status = SubscriptionStatus::Active;
    *harness.plans.open.lock().unwrap() = Some(plan);

    let (status, _) = send(
        &harness,
        webhook_request(approved_payload().to_string(), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let updates = harness.plans.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].installments_paid, 2);
    assert!(harness.mailer.welcomes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn payer_without_email_is_logged_but_not_notified() {
    let harness = harness(GatewayConfig::default());
    let mut payload = approved_payload();
    payload["idperson"] = json!({
        "phone": "3001234567",
        "identification": "123456789"
    });

    let (status, _) = send(&harness, webhook_request(payload.to_string(), None)).await;

    assert_eq!(status, StatusCode::OK);

    let entries = harness.log.entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].payer_email, None);
    assert!(harness.mailer.results.lock().unwrap().is_empty());
    assert!(harness.mailer.welcomes.lock().unwrap().is_empty());
}

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test]
async fn health_endpoint_reports_service_status() {
    let harness = harness(GatewayConfig::default());

    let request = Request::builder()
        .method("GET")
        .uri("/api/payments/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&harness, request).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "OK");
    assert_eq!(json["service"], "Payment Webhook Service");
}

#[tokio::test]
async fn root_reports_liveness_text() {
    let harness = harness(GatewayConfig::default());

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&harness, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Payment Webhook Service is running");
}
