//! HTTP DTOs (Data Transfer Objects) for the payments endpoints.
//!
//! The request side mirrors the gateway's callback JSON verbatim, Spanish
//! field names included, and converts into the domain `PaymentEvent`. The
//! response side covers the health probe and the structured body returned
//! when the audit log write fails.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::payment::{PayerDetails, PaymentEvent, PaymentStatus, WebhookError};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Gateway callback payload as it arrives on the wire.
///
/// Every field is optional at the parsing stage; [`WebhookRequest::into_event`]
/// enforces the two mandatory ones (`idstatus`, `externalorder`). Extra wire
/// fields (`ip`, `additionaldata`, ...) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookRequest {
    /// Gateway transaction id. Sent as a string or a number depending on
    /// the payment method.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    /// Merchant order id.
    #[serde(default)]
    pub externalorder: Option<String>,

    /// Amount charged.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Option<f64>,

    /// Payer display name, flat variant.
    #[serde(default)]
    pub fullname: Option<String>,

    /// Gateway status catalog entry.
    #[serde(default)]
    pub idstatus: Option<StatusDto>,

    /// Nested payer identity.
    #[serde(default)]
    pub idperson: Option<PersonDto>,

    /// Payment method catalog entry.
    #[serde(default)]
    pub paymentmethod: Option<PaymentMethodDto>,
}

/// `idstatus` catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusDto {
    pub id: i32,
    #[serde(default)]
    pub nombre: Option<String>,
}

/// `idperson` nested payer identity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonDto {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub identification: Option<String>,
}

/// `paymentmethod` catalog entry; only the display name is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentMethodDto {
    #[serde(default)]
    pub nombre: Option<String>,
}

impl WebhookRequest {
    /// Validate the mandatory fields and build the domain event.
    ///
    /// `raw` is the payload as parsed, retained verbatim for the audit log.
    ///
    /// # Errors
    ///
    /// - `InvalidPayload` when `idstatus` is missing or `externalorder` is
    ///   missing or empty
    pub fn into_event(self, raw: Value) -> Result<PaymentEvent, WebhookError> {
        let status = self
            .idstatus
            .ok_or_else(|| WebhookError::invalid_payload("Missing idstatus"))?;

        let order_id = match self.externalorder {
            Some(order) if !order.is_empty() => order,
            _ => return Err(WebhookError::invalid_payload("Missing externalorder")),
        };

        let payer = self.idperson.unwrap_or_default();

        Ok(PaymentEvent {
            transaction_id: self.id,
            order_id,
            amount: self.amount,
            status: PaymentStatus {
                id: status.id,
                name: status.nombre.unwrap_or_default(),
            },
            payer: PayerDetails {
                email: payer.email,
                phone: payer.phone,
                first_name: payer.firstname,
                last_name: payer.lastname,
                identification: payer.identification,
            },
            full_name: self.fullname,
            payment_method: self.paymentmethod.and_then(|m| m.nombre),
            raw,
        })
    }
}

/// Accepts a JSON string or number, normalizing to a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a JSON number or a numeric string.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Fixed "OK" marker.
    pub status: String,
    /// Configured service display name.
    pub service: String,
    /// Current server time (ISO 8601).
    pub timestamp: String,
}

/// JSON body returned when the audit log write fails.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseErrorResponse {
    /// Fixed "Database error" marker.
    pub error: String,
    /// Storage-level failure description.
    pub details: String,
}
