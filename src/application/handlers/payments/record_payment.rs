//! RecordPaymentHandler - Command handler for appending to the payment log.

use std::sync::Arc;

use crate::domain::foundation::CustomerId;
use crate::domain::payment::{PaymentEvent, PaymentLogEntry, WebhookError};
use crate::ports::PaymentLogStore;

/// Command to record one payment delivery.
#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    /// The validated payment event.
    pub event: PaymentEvent,
    /// Customer matched by the directory lookup, if any.
    pub customer_id: Option<CustomerId>,
}

/// Result of recording a payment.
#[derive(Debug, Clone)]
pub struct RecordPaymentResult {
    /// The log entry as persisted.
    pub entry: PaymentLogEntry,
}

/// Handler for the audit log write.
///
/// This is the one write the ingestion pipeline refuses to lose: a
/// failure here is reported back to the gateway so it retries the
/// delivery.
pub struct RecordPaymentHandler {
    log_store: Arc<dyn PaymentLogStore>,
}

impl RecordPaymentHandler {
    pub fn new(log_store: Arc<dyn PaymentLogStore>) -> Self {
        Self { log_store }
    }

    pub async fn handle(
        &self,
        cmd: RecordPaymentCommand,
    ) -> Result<RecordPaymentResult, WebhookError> {
        let entry = PaymentLogEntry::from_event(&cmd.event, cmd.customer_id);

        self.log_store
            .append(&entry)
            .await
            .map_err(|e| WebhookError::database("Database error", e.message))?;

        Ok(RecordPaymentResult { entry })
    }
}
