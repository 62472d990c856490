//! Append-only audit record for every webhook delivery.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{CustomerId, PaymentLogId, Timestamp};
use crate::domain::payment::event::PaymentEvent;

/// One row in the payment log.
///
/// Every delivery that passes structural validation is recorded here,
/// approved or not, including repeat deliveries of the same transaction.
/// The unmodified payload travels along in `raw_response` so disputes can
/// be settled against what the gateway actually sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLogEntry {
    pub id: PaymentLogId,
    pub order_id: String,
    pub transaction_id: Option<String>,
    pub amount: Option<f64>,
    pub status_id: i32,
    pub status_name: String,
    pub payer_email: Option<String>,
    pub payer_phone: Option<String>,
    pub payer_name: Option<String>,
    pub payer_identification: Option<String>,
    pub payment_method: Option<String>,
    pub raw_response: Value,
    pub customer_id: Option<CustomerId>,
    pub received_at: Timestamp,
}

impl PaymentLogEntry {
    /// Builds a log entry from a validated event and an optional customer
    /// match from the directory lookup.
    pub fn from_event(event: &PaymentEvent, customer_id: Option<CustomerId>) -> Self {
        Self {
            id: PaymentLogId::new(),
            order_id: event.order_id.clone(),
            transaction_id: event.transaction_id.clone(),
            amount: event.amount,
            status_id: event.status.id,
            status_name: event.status.name.clone(),
            payer_email: event.payer.email.clone(),
            payer_phone: event.payer.phone.clone(),
            payer_name: event.payer_name(),
            payer_identification: event.payer.identification.clone(),
            payment_method: event.payment_method.clone(),
            raw_response: event.raw.clone(),
            customer_id,
            received_at: Timestamp::now(),
        }
    }
}
