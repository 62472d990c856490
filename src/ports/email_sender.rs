//! Email sender port for customer notifications.
//!
//! Defines the contract for the two transactional emails the ingestion
//! pipeline sends: a payment result notice for every processed payment
//! with a known address, and a welcome email on the first approved
//! installment of a plan.
//!
//! # Design
//!
//! - **Fire-and-forget**: Callers never fail a delivery over email errors
//! - **Provider agnostic**: Interface works with any transactional sender

use crate::domain::foundation::DomainError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for sending customer-facing notification emails.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send the payment result notice for one processed payment.
    ///
    /// # Errors
    ///
    /// - `NotificationError` when the provider rejects the send
    async fn send_payment_result(&self, notice: &PaymentResultNotice) -> Result<(), DomainError>;

    /// Send the welcome email for a plan's first approved installment.
    ///
    /// # Errors
    ///
    /// - `NotificationError` when the provider rejects the send or the
    ///   welcome template cannot be loaded
    async fn send_welcome(&self, notice: &WelcomeNotice) -> Result<(), DomainError>;
}

/// Payment result notice contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResultNotice {
    /// Recipient address.
    pub to: String,

    /// Merchant order the payment belongs to.
    pub order_id: String,

    /// Whether the payment was approved.
    pub approved: bool,

    /// Gateway status display name ("Aprobada", "Rechazada", ...).
    pub status_name: String,

    /// Amount charged, when the gateway reported one.
    pub amount: Option<f64>,

    /// Payer's display name, when known.
    pub payer_name: Option<String>,
}

/// Welcome email contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelcomeNotice {
    /// Recipient address.
    pub to: String,

    /// Payer's display name, when known.
    pub payer_name: Option<String>,

    /// Merchant order of the first approved installment.
    pub order_id: String,

    /// Amount of the first installment, when reported.
    pub amount: Option<f64>,
}
