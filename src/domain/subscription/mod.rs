//! Subscription domain: installment plans and their payment lifecycle.

pub mod aggregate;
pub mod errors;
pub mod status;

pub use aggregate::{PaymentApplication, Subscription};
pub use errors::SubscriptionError;
pub use status::SubscriptionStatus;
