//! IngestWebhookHandler - Command handler orchestrating one webhook delivery.

use std::sync::Arc;

use crate::domain::foundation::{CustomerId, PaymentLogId};
use crate::domain::payment::{PaymentEvent, PaymentOutcome, WebhookError};
use crate::ports::{CustomerDirectory, EmailSender, PaymentLogStore, SubscriptionStore};

use super::{
    ApplySubscriptionPaymentCommand, ApplySubscriptionPaymentHandler,
    ApplySubscriptionPaymentResult, DispatchNotificationsCommand, DispatchNotificationsHandler,
    RecordPaymentCommand, RecordPaymentHandler, ResolveCustomerHandler, ResolveCustomerQuery,
};

/// Command to ingest one validated payment callback.
#[derive(Debug, Clone)]
pub struct IngestWebhookCommand {
    pub event: PaymentEvent,
}

/// Result of ingesting a callback.
#[derive(Debug, Clone)]
pub struct IngestWebhookResult {
    /// Outcome derived from the gateway status.
    pub outcome: PaymentOutcome,
    /// The audit log row that was written.
    pub log_id: PaymentLogId,
    /// Customer matched by the directory lookup, if any.
    pub customer_id: Option<CustomerId>,
    /// Whether an open plan's ledger was advanced.
    pub ledger_updated: bool,
    /// Whether this was a plan's first approved installment.
    pub first_payment: bool,
}

/// Handler orchestrating the ingestion pipeline.
///
/// The steps run in a fixed order with distinct failure policies:
///
/// 1. Customer lookup - best effort, a failure just unlinks the log row
/// 2. Audit log write - the only fatal step, reported to the gateway
/// 3. Ledger update - absorbed, the log row is the source of truth
/// 4. Notifications - spawned, the response never waits for email
pub struct IngestWebhookHandler {
    resolve_customer: ResolveCustomerHandler,
    record_payment: RecordPaymentHandler,
    apply_subscription: ApplySubscriptionPaymentHandler,
    notifications: DispatchNotificationsHandler,
}

impl IngestWebhookHandler {
    pub fn new(
        directory: Arc<dyn CustomerDirectory>,
        log_store: Arc<dyn PaymentLogStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            resolve_customer: ResolveCustomerHandler::new(directory),
            record_payment: RecordPaymentHandler::new(log_store),
            apply_subscription: ApplySubscriptionPaymentHandler::new(subscriptions),
            notifications: DispatchNotificationsHandler::new(email),
        }
    }

    pub async fn handle(
        &self,
        cmd: IngestWebhookCommand,
    ) -> Result<IngestWebhookResult, WebhookError> {
        let event = cmd.event;
        tracing::info!(
            "Processing payment for order {} - status: {}",
            event.order_id,
            event.status.name
        );

        // 1. Best-effort customer match
        let customer_id = match self
            .resolve_customer
            .handle(ResolveCustomerQuery {
                email: event.payer.email.clone(),
                phone: event.payer.phone.clone(),
            })
            .await
        {
            Ok(resolved) => resolved.customer_id,
            Err(e) => {
                tracing::warn!(
                    "Customer lookup failed for order {}: {}",
                    event.order_id,
                    e
                );
                None
            }
        };

        // 2. Audit log write, the only step allowed to fail the delivery
        let recorded = self
            .record_payment
            .handle(RecordPaymentCommand {
                event: event.clone(),
                customer_id,
            })
            .await?;

        // 3. Ledger update, absorbed so the gateway still gets its ack
        let (ledger_updated, first_payment) = match self
            .apply_subscription
            .handle(ApplySubscriptionPaymentCommand {
                event: event.clone(),
            })
            .await
        {
            Ok(ApplySubscriptionPaymentResult::Applied {
                subscription_id,
                status,
                installments_paid,
                first_payment,
                completed,
            }) => {
                tracing::info!(
                    "Subscription {} now {:?} with {} installments paid",
                    subscription_id,
                    status,
                    installments_paid
                );
                if completed {
                    tracing::info!("Subscription {} completed its plan", subscription_id);
                }
                (true, first_payment)
            }
            Ok(ApplySubscriptionPaymentResult::NoIdentification) => {
                tracing::debug!(
                    "Order {} carried no identification, ledger untouched",
                    event.order_id
                );
                (false, false)
            }
            Ok(ApplySubscriptionPaymentResult::NoOpenPlan) => {
                tracing::debug!("No open subscription for order {}", event.order_id);
                (false, false)
            }
            Err(e) => {
                tracing::warn!(
                    "Subscription update failed for order {}: {}",
                    event.order_id,
                    e
                );
                (false, false)
            }
        };

        // 4. Fire-and-forget notifications
        let notifications = self.notifications.clone();
        let notify_event = event.clone();
        tokio::spawn(async move {
            notifications
                .handle(DispatchNotificationsCommand {
                    event: notify_event,
                    first_payment,
                })
                .await;
        });

        if event.is_approved() {
            tracing::info!("Payment completed for order {}", event.order_id);
        }

        Ok(IngestWebhookResult {
            outcome: event.outcome(),
            log_id: recorded.entry.id,
            customer_id,
            ledger_updated,
            first_payment,
        })
    }
}
