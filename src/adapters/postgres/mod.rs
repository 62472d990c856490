//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresCustomerDirectory` - Customer lookup by contact details
//! - `PostgresPaymentLogStore` - Append-only payment audit log
//! - `PostgresSubscriptionStore` - Installment plan persistence

mod customer_directory;
mod payment_log_store;
mod subscription_store;

pub use customer_directory::PostgresCustomerDirectory;
pub use payment_log_store::PostgresPaymentLogStore;
pub use subscription_store::PostgresSubscriptionStore;
