//! DispatchNotificationsHandler - Command handler for customer emails.

use std::sync::Arc;

use crate::domain::payment::PaymentEvent;
use crate::ports::{EmailSender, PaymentResultNotice, WelcomeNotice};

/// Command to send the emails for one processed payment.
#[derive(Debug, Clone)]
pub struct DispatchNotificationsCommand {
    /// The validated payment event.
    pub event: PaymentEvent,
    /// Whether this payment was the first approved installment of a plan.
    pub first_payment: bool,
}

/// What actually went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchNotificationsResult {
    pub payment_result_sent: bool,
    pub welcome_sent: bool,
}

/// Handler for the notification fan-out.
///
/// Sends the payment result notice to the payer, plus the welcome email
/// when this was a plan's first approved installment. Never fails:
/// provider errors are logged and reflected in the result, and a missing
/// payer address turns the whole dispatch into a no-op.
#[derive(Clone)]
pub struct DispatchNotificationsHandler {
    email: Arc<dyn EmailSender>,
}

impl DispatchNotificationsHandler {
    pub fn new(email: Arc<dyn EmailSender>) -> Self {
        Self { email }
    }

    pub async fn handle(&self, cmd: DispatchNotificationsCommand) -> DispatchNotificationsResult {
        let event = &cmd.event;
        let to = match event.payer_email().filter(|e| !e.trim().is_empty()) {
            Some(to) => to.to_string(),
            None => {
                tracing::debug!(
                    "No payer email for order {}, skipping notifications",
                    event.order_id
                );
                return DispatchNotificationsResult {
                    payment_result_sent: false,
                    welcome_sent: false,
                };
            }
        };

        let notice = PaymentResultNotice {
            to: to.clone(),
            order_id: event.order_id.clone(),
            approved: event.is_approved(),
            status_name: event.status.name.clone(),
            amount: event.amount,
            payer_name: event.payer_name(),
        };
        let payment_result_sent = match self.email.send_payment_result(&notice).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Payment result email failed for order {}: {}",
                    event.order_id,
                    e
                );
                false
            }
        };

        let mut welcome_sent = false;
        if cmd.first_payment {
            let welcome = WelcomeNotice {
                to,
                payer_name: event.payer_name(),
                order_id: event.order_id.clone(),
                amount: event.amount,
            };
            match self.email.send_welcome(&welcome).await {
                Ok(()) => welcome_sent = true,
                Err(e) => {
                    tracing::warn!(
                        "Welcome email failed for order {}: {}",
                        event.order_id,
                        e
                    );
                }
            }
        }

        DispatchNotificationsResult {
            payment_result_sent,
            welcome_sent,
        }
    }
}
