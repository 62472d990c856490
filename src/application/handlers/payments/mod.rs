//! Payment ingestion handlers.
//!
//! Command and query handlers for the webhook pipeline:
//!
//! ## Commands
//! - Ingesting one webhook delivery end to end
//! - Appending to the payment audit log
//! - Advancing a subscription's installment ledger
//! - Dispatching customer notification emails
//!
//! ## Queries
//! - Resolving a payer against the customer directory

mod apply_subscription_payment;
mod dispatch_notifications;
mod ingest_webhook;
mod record_payment;
mod resolve_customer;

// Commands
pub use apply_subscription_payment::{
    ApplySubscriptionPaymentCommand, ApplySubscriptionPaymentHandler,
    ApplySubscriptionPaymentResult,
};
pub use dispatch_notifications::{
    DispatchNotificationsCommand, DispatchNotificationsHandler, DispatchNotificationsResult,
};
pub use ingest_webhook::{IngestWebhookCommand, IngestWebhookHandler, IngestWebhookResult};
pub use record_payment::{RecordPaymentCommand, RecordPaymentHandler, RecordPaymentResult};

// Queries
pub use resolve_customer::{ResolveCustomerHandler, ResolveCustomerQuery, ResolveCustomerResult};
