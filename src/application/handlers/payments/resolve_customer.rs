//! ResolveCustomerHandler - Query handler for matching a payment to a customer.

use std::sync::Arc;

use crate::domain::foundation::CustomerId;
use crate::domain::payment::WebhookError;
use crate::ports::CustomerDirectory;

/// Query to resolve a payer to a known customer.
#[derive(Debug, Clone)]
pub struct ResolveCustomerQuery {
    /// Payer email from the callback, if any.
    pub email: Option<String>,
    /// Payer phone from the callback, if any.
    pub phone: Option<String>,
}

/// Result of customer resolution.
#[derive(Debug, Clone)]
pub struct ResolveCustomerResult {
    /// Matched customer, or `None` when the payer is unknown.
    pub customer_id: Option<CustomerId>,
}

/// Handler for resolving a payer against the customer directory.
///
/// Tries email first, then falls back to phone. Callers treat a miss
/// and a lookup failure the same way: the payment is still recorded,
/// just without a customer link.
pub struct ResolveCustomerHandler {
    directory: Arc<dyn CustomerDirectory>,
}

impl ResolveCustomerHandler {
    pub fn new(directory: Arc<dyn CustomerDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(
        &self,
        query: ResolveCustomerQuery,
    ) -> Result<ResolveCustomerResult, WebhookError> {
        if let Some(email) = query.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if let Some(customer_id) = self
                .directory
                .find_by_email(email)
                .await
                .map_err(WebhookError::from)?
            {
                return Ok(ResolveCustomerResult {
                    customer_id: Some(customer_id),
                });
            }
        }

        if let Some(phone) = query.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            if let Some(customer_id) = self
                .directory
                .find_by_phone(phone)
                .await
                .map_err(WebhookError::from)?
            {
                return Ok(ResolveCustomerResult {
                    customer_id: Some(customer_id),
                });
            }
        }

        Ok(ResolveCustomerResult { customer_id: None })
    }
}
