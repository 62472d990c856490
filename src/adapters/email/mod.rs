//! Resend email adapter.
//!
//! Implements the `EmailSender` port over the Resend HTTP API:
//! - Payment result notices with inline HTML built per outcome
//! - Subscription welcome emails rendered from an on-disk template
//!
//! # Configuration
//!
//! Required environment variables:
//! - `PAYMENTS_WEBHOOK__EMAIL__RESEND_API_KEY`: Resend API key (re_...)
//! - `PAYMENTS_WEBHOOK__EMAIL__FROM_EMAIL`: sender address

mod resend_mailer;
mod templates;

pub use resend_mailer::ResendMailer;
pub use templates::WELCOME_SUBJECT;
