//! Validated payment event parsed from a gateway webhook delivery.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::payment::outcome::PaymentOutcome;

/// Gateway status as reported in the callback (catalog id plus display name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub id: i32,
    pub name: String,
}

/// Payer identity fields nested in the callback payload.
///
/// Every field is optional on the wire; the identification number is the
/// join key against the subscription ledger when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayerDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub identification: Option<String>,
}

/// A payment callback that passed structural validation.
///
/// `order_id` and `status` are the only mandatory fields; the gateway omits
/// or nulls everything else depending on the payment method and how far the
/// flow progressed. The full payload is retained in `raw` for the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub transaction_id: Option<String>,
    pub order_id: String,
    pub amount: Option<f64>,
    pub status: PaymentStatus,
    pub payer: PayerDetails,
    pub full_name: Option<String>,
    pub payment_method: Option<String>,
    pub raw: Value,
}

impl PaymentEvent {
    /// Derives the binary outcome from the gateway status id.
    pub fn outcome(&self) -> PaymentOutcome {
        PaymentOutcome::from_status_id(self.status.id)
    }

    pub fn is_approved(&self) -> bool {
        self.outcome().is_approved()
    }

    /// Display name for the payer.
    ///
    /// Prefers the flat `full_name` field, then falls back to joining the
    /// nested first and last names. Returns `None` when no name was sent.
    pub fn payer_name(&self) -> Option<String> {
        if let Some(name) = &self.full_name {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        let first = self.payer.first_name.as_deref().unwrap_or("").trim();
        let last = self.payer.last_name.as_deref().unwrap_or("").trim();
        match (first.is_empty(), last.is_empty()) {
            (true, true) => None,
            (false, true) => Some(first.to_string()),
            (true, false) => Some(last.to_string()),
            (false, false) => Some(format!("{} {}", first, last)),
        }
    }

    pub fn payer_email(&self) -> Option<&str> {
        self.payer.email.as_deref()
    }

    pub fn payer_identification(&self) -> Option<&str> {
        self.payer.identification.as_deref()
    }
}
