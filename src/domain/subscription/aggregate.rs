//! Subscription aggregate entity.
//!
//! The Subscription aggregate represents one customer's installment payment
//! plan. Plans are keyed by the payer's identification number, which is how
//! gateway callbacks are matched to them.
//!
//! # Design Decisions
//!
//! - **Identification as join key**: Callbacks carry no subscription id, only
//!   the payer's identification number
//! - **Ledger clamp**: `installments_paid` never exceeds `total_installments`,
//!   even on repeat deliveries of the final payment
//! - **First transaction pinned**: `initial_transaction_id` is set once and
//!   never overwritten by later payments
//! - **Every payment leaves a trace**: `response_data` and `updated_at` are
//!   stamped on failures too, so support can see the latest gateway response

use crate::domain::foundation::{SubscriptionId, Timestamp};
use crate::domain::payment::PaymentEvent;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{SubscriptionError, SubscriptionStatus};

/// What a single payment did to the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentApplication {
    /// This was the first approved installment of the plan.
    pub first_payment: bool,
    /// This payment filled the ledger and closed the plan.
    pub completed: bool,
}

/// Subscription aggregate - one installment plan for one customer.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `0 <= installments_paid <= total_installments`
/// - `status` is `Completed` exactly when the ledger is full
/// - Status transitions follow state machine rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique identifier for this plan.
    pub id: SubscriptionId,

    /// Payer's identification number. Matches callbacks to this plan.
    pub identification: String,

    /// Current status in the collection lifecycle.
    pub status: SubscriptionStatus,

    /// Installments collected so far.
    pub installments_paid: i32,

    /// Installments the plan is sized for.
    pub total_installments: i32,

    /// When the last approved installment was collected.
    pub last_payment_date: Option<Timestamp>,

    /// When the next installment is expected.
    pub next_payment_date: Option<Timestamp>,

    /// Gateway transaction id of the first approved payment.
    pub initial_transaction_id: Option<String>,

    /// Latest gateway response recorded against this plan.
    pub response_data: Option<Value>,

    /// When the plan was created.
    pub created_at: Timestamp,

    /// When the plan was last updated.
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Create a new plan awaiting its first installment.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the identification is blank or the
    /// installment count is not positive.
    pub fn create(
        id: SubscriptionId,
        identification: impl Into<String>,
        total_installments: i32,
    ) -> Result<Self, SubscriptionError> {
        let identification = identification.into();
        if identification.trim().is_empty() {
            return Err(SubscriptionError::validation(
                "identification",
                "must not be empty",
            ));
        }
        if total_installments <= 0 {
            return Err(SubscriptionError::validation(
                "total_installments",
                "must be positive",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            identification,
            status: SubscriptionStatus::PendingFirstPayment,
            installments_paid: 0,
            total_installments,
            last_payment_date: None,
            next_payment_date: None,
            initial_transaction_id: None,
            response_data: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// True once every installment has been collected.
    pub fn is_ledger_complete(&self) -> bool {
        self.installments_paid >= self.total_installments
    }

    /// Installments still owed.
    pub fn remaining_installments(&self) -> i32 {
        (self.total_installments - self.installments_paid).max(0)
    }

    /// Apply one payment callback to the plan.
    ///
    /// An approved payment advances the ledger, stamps the payment dates,
    /// and pins the first transaction id. A non-approved payment only
    /// demotes an active plan to past due. Either way, the gateway response
    /// and the update time are recorded.
    ///
    /// `now` is injected so the next payment date lands exactly one
    /// calendar month later regardless of when the row is persisted.
    ///
    /// # Errors
    ///
    /// Returns an invalid-state error when the plan is already completed.
    pub fn apply_payment(
        &mut self,
        event: &PaymentEvent,
        now: Timestamp,
    ) -> Result<PaymentApplication, SubscriptionError> {
        if !self.status.is_open() {
            return Err(SubscriptionError::invalid_state(
                format!("{:?}", self.status),
                "apply_payment",
            ));
        }

        let outcome = event.outcome();
        // Read before the ledger moves: both signals mean "no installment
        // has been collected yet".
        let first_payment = outcome.is_approved()
            && (self.installments_paid == 0
                || self.status == SubscriptionStatus::PendingFirstPayment);

        if outcome.is_approved() {
            self.installments_paid = (self.installments_paid + 1).min(self.total_installments);
            self.last_payment_date = Some(now);
            self.next_payment_date = Some(now.add_months(1));
            if self.initial_transaction_id.is_none() {
                self.initial_transaction_id = event.transaction_id.clone();
            }
        }

        let next_status = self.status.after_payment(outcome, self.is_ledger_complete());
        if next_status != self.status {
            self.transition(next_status)?;
        }

        self.response_data = Some(json!({
            "transaction_id": event.transaction_id,
            "payload": event.raw,
        }));
        self.updated_at = now;

        Ok(PaymentApplication {
            first_payment,
            completed: self.status == SubscriptionStatus::Completed,
        })
    }

    /// Transition to a new status using the state machine.
    fn transition(&mut self, target: SubscriptionStatus) -> Result<(), SubscriptionError> {
        use crate::domain::foundation::StateMachine;

        self.status = self.status.transition_to(target).map_err(|_| {
            SubscriptionError::invalid_state(
                format!("{:?}", self.status),
                format!("transition to {:?}", target),
            )
        })?;
        Ok(())
    }
}
