//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `CustomerDirectory` - Customer lookup by contact details
//! - `PaymentLogStore` - Append-only payment audit log
//! - `SubscriptionStore` - Installment plan persistence
//!
//! ## Notification Ports
//!
//! - `EmailSender` - Transactional customer emails

mod customer_directory;
mod email_sender;
mod payment_log_store;
mod subscription_store;

pub use customer_directory::CustomerDirectory;
pub use email_sender::{EmailSender, PaymentResultNotice, WelcomeNotice};
pub use payment_log_store::PaymentLogStore;
pub use subscription_store::SubscriptionStore;
