//! Payment callback domain: validated events, outcomes, and the audit log.

pub mod errors;
pub mod event;
pub mod log_entry;
pub mod outcome;

pub use errors::WebhookError;
pub use event::{PayerDetails, PaymentEvent, PaymentStatus};
pub use log_entry::PaymentLogEntry;
pub use outcome::{PaymentOutcome, APPROVED_STATUS_ID};
