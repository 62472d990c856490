//! Payment outcome derived from the gateway status catalog.

use serde::{Deserialize, Serialize};

/// Gateway status id that marks a payment as approved ("Aprobada").
pub const APPROVED_STATUS_ID: i32 = 34;

/// Binary outcome of a payment callback.
///
/// The gateway reports a catalog of statuses (approved, rejected, pending,
/// failed, reversed). Only the approved sentinel advances the installment
/// ledger; every other status is treated uniformly as not approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    Approved,
    NotApproved,
}

impl PaymentOutcome {
    /// Derives the outcome from a gateway status id.
    pub fn from_status_id(status_id: i32) -> Self {
        if status_id == APPROVED_STATUS_ID {
            PaymentOutcome::Approved
        } else {
            PaymentOutcome::NotApproved
        }
    }

    /// Returns true for the approved outcome.
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentOutcome::Approved)
    }
}
