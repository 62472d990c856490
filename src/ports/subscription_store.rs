//! Subscription store port (write side).
//!
//! Defines the contract for loading and persisting Subscription
//! aggregates. Plans are provisioned by the enrollment flow; ingestion
//! only finds them by the payer's identification number and writes the
//! updated ledger back.
//!
//! # Design
//!
//! - **Identification lookup**: Callbacks carry no subscription id
//! - **Open plans only**: Completed plans are invisible to ingestion
//!
//! # Example
//!
//! ```ignore
//! async fn advance_ledger(
//!     store: &dyn SubscriptionStore,
//!     event: &PaymentEvent,
//! ) -> Result<(), DomainError> {
//!     let Some(mut plan) = store
//!         .find_open_by_identification("123456789")
//!         .await?
//!     else {
//!         return Ok(());
//!     };
//!
//!     plan.apply_payment(event, Timestamp::now())?;
//!     store.update(&plan).await
//! }
//! ```

use crate::domain::foundation::DomainError;
use crate::domain::subscription::Subscription;
use async_trait::async_trait;

/// Port for Subscription aggregate persistence.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Find the open plan for a payer's identification number.
    ///
    /// Open means pending first payment, active, or past due. Returns
    /// `None` when the payer has no open plan. When several open plans
    /// exist, implementations return the most recently created one.
    async fn find_open_by_identification(
        &self,
        identification: &str,
    ) -> Result<Option<Subscription>, DomainError>;

    /// Write an updated plan back.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the plan no longer exists
    /// - `DatabaseError` on persistence failure
    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;
}
