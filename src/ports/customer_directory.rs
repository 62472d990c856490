//! Customer directory port (read side).
//!
//! Defines the lookup contract against the customer registry that the
//! enrollment flow populates. Webhook ingestion only reads from it, to
//! link payment log rows to known customers.
//!
//! # Design
//!
//! - **Read-only**: Ingestion never creates or updates customers
//! - **Best effort**: A missed match degrades the log row, not the delivery

use crate::domain::foundation::{CustomerId, DomainError};
use async_trait::async_trait;

/// Port for looking up customers by their contact details.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Find a customer by email address.
    ///
    /// Returns `None` if no customer matches.
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerId>, DomainError>;

    /// Find a customer by phone number.
    ///
    /// Returns `None` if no customer matches. Used as a fallback when the
    /// payload carries no email.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<CustomerId>, DomainError>;
}
