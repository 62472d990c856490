//! Subscription status state machine.
//!
//! Defines all possible subscription states and valid transitions
//! according to the installment payment lifecycle.

use crate::domain::foundation::StateMachine;
use crate::domain::payment::PaymentOutcome;
use serde::{Deserialize, Serialize};

/// Installment subscription status.
///
/// Represents where a customer's payment plan stands in the
/// collection lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Initial state. The plan exists but no installment has been
    /// collected yet.
    PendingFirstPayment,

    /// At least one installment collected and more remain.
    Active,

    /// The most recent collection attempt on an active plan failed.
    /// The plan keeps its installment count and can recover.
    PastDue,

    /// Every installment collected. Terminal state.
    Completed,
}

impl SubscriptionStatus {
    /// Returns true if this subscription can still receive payments.
    ///
    /// Open states:
    /// - PendingFirstPayment: Awaiting the first installment
    /// - Active: Mid-plan
    /// - PastDue: Recoverable after a failed attempt
    ///
    /// Completed plans are closed to further ledger updates.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::PendingFirstPayment
                | SubscriptionStatus::Active
                | SubscriptionStatus::PastDue
        )
    }

    /// Next status after a payment with the given outcome.
    ///
    /// `ledger_complete` reports whether the installment ledger reached
    /// its total with this payment. An approved payment activates the
    /// plan, or completes it when the ledger is full. A non-approved
    /// payment demotes an active plan to past due and leaves every
    /// other state untouched. Completed absorbs everything.
    pub fn after_payment(&self, outcome: PaymentOutcome, ledger_complete: bool) -> Self {
        use SubscriptionStatus::*;
        if matches!(self, Completed) {
            return Completed;
        }
        match outcome {
            PaymentOutcome::Approved if ledger_complete => Completed,
            PaymentOutcome::Approved => Active,
            PaymentOutcome::NotApproved => match self {
                Active => PastDue,
                other => *other,
            },
        }
    }
}

impl StateMachine for SubscriptionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubscriptionStatus::*;
        matches!(
            (self, target),
            // From PENDING_FIRST_PAYMENT
            (PendingFirstPayment, Active)
                | (PendingFirstPayment, Completed) // Single-installment plan
            // From ACTIVE
                | (Active, PastDue)
                | (Active, Completed)
            // From PAST_DUE
                | (PastDue, Active)
                | (PastDue, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubscriptionStatus::*;
        match self {
            PendingFirstPayment => vec![Active, Completed],
            Active => vec![PastDue, Completed],
            PastDue => vec![Active, Completed],
            Completed => vec![],
        }
    }
}
