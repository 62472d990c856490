//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::payments::{
    // Pipeline orchestrator
    IngestWebhookCommand,
    IngestWebhookHandler,
    IngestWebhookResult,
    // Pipeline steps
    ApplySubscriptionPaymentCommand,
    ApplySubscriptionPaymentHandler,
    ApplySubscriptionPaymentResult,
    DispatchNotificationsCommand,
    DispatchNotificationsHandler,
    DispatchNotificationsResult,
    RecordPaymentCommand,
    RecordPaymentHandler,
    RecordPaymentResult,
    ResolveCustomerHandler,
    ResolveCustomerQuery,
    ResolveCustomerResult,
};
