//! Payment log store port (write side).
//!
//! Defines the contract for the append-only payment audit log. Every
//! structurally valid delivery is recorded here before anything else
//! happens to it.
//!
//! # Design
//!
//! - **Append-only**: Log rows are never updated or deleted
//! - **No dedup**: Repeat deliveries of the same transaction each get a row

use crate::domain::foundation::DomainError;
use crate::domain::payment::PaymentLogEntry;
use async_trait::async_trait;

/// Port for persisting payment log entries.
#[async_trait]
pub trait PaymentLogStore: Send + Sync {
    /// Append one entry to the log.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure. This is the one storage
    ///   error the ingestion pipeline reports back to the gateway.
    async fn append(&self, entry: &PaymentLogEntry) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn payment_log_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn PaymentLogStore) {}
    }
}
