//! Subscription-specific error types.
//!
//! Errors related to installment ledger updates. These never change the
//! webhook response; the ingestion pipeline logs them and acknowledges
//! the delivery anyway.

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId};

/// Subscription-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Subscription was not found.
    NotFound(SubscriptionId),

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn not_found(id: SubscriptionId) -> Self {
        SubscriptionError::NotFound(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        SubscriptionError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::NotFound(_) => ErrorCode::SubscriptionNotFound,
            SubscriptionError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            SubscriptionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SubscriptionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::NotFound(id) => format!("Subscription not found: {}", id),
            SubscriptionError::InvalidState { current, attempted } => {
                format!("Cannot {} subscription in {} state", attempted, current)
            }
            SubscriptionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SubscriptionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubscriptionError {}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => SubscriptionError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.to_string(),
            },
            ErrorCode::ValidationFailed => SubscriptionError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
            _ => SubscriptionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<SubscriptionError> for DomainError {
    fn from(err: SubscriptionError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================
    // Constructor Tests
    // ============================================================

    #[test]
    fn not_found_creates_correctly() {
        let id = SubscriptionId::new();
        let err = SubscriptionError::not_found(id);
        assert!(matches!(err, SubscriptionError::NotFound(i) if i == id));
        assert_eq!(err.code(), ErrorCode::SubscriptionNotFound);
    }

    #[test]
    fn invalid_state_creates_correctly() {
        let err = SubscriptionError::invalid_state("completed", "apply_payment");
        assert!(matches!(
            err,
            SubscriptionError::InvalidState { ref current, ref attempted }
            if current == "completed" && attempted == "apply_payment"
        ));
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn validation_creates_correctly() {
        let err = SubscriptionError::validation("identification", "must not be empty");
        assert!(matches!(
            err,
            SubscriptionError::ValidationFailed { ref field, ref message }
            if field == "identification" && message == "must not be empty"
        ));
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn infrastructure_creates_correctly() {
        let err = SubscriptionError::infrastructure("database connection lost");
        assert!(matches!(
            err,
            SubscriptionError::Infrastructure(ref m) if m == "database connection lost"
        ));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    // ============================================================
    // Message Tests
    // ============================================================

    #[test]
    fn not_found_message_includes_id() {
        let id = SubscriptionId::new();
        let err = SubscriptionError::not_found(id);
        assert!(err.message().contains(&id.to_string()));
    }

    #[test]
    fn invalid_state_message_includes_states() {
        let err = SubscriptionError::invalid_state("completed", "apply_payment");
        let msg = err.message();
        assert!(msg.contains("completed"));
        assert!(msg.contains("apply_payment"));
    }

    // ============================================================
    // Display Tests
    // ============================================================

    #[test]
    fn display_matches_message() {
        let err = SubscriptionError::validation("total_installments", "must be positive");
        assert_eq!(format!("{}", err), err.message());
    }

    // ============================================================
    // Conversion Tests
    // ============================================================

    #[test]
    fn converts_to_domain_error() {
        let err = SubscriptionError::not_found(SubscriptionId::new());
        let domain_err: DomainError = err.clone().into();
        assert_eq!(domain_err.code, err.code());
    }

    #[test]
    fn converts_from_domain_error() {
        let domain_err = DomainError::new(ErrorCode::ValidationFailed, "bad field");
        let sub_err: SubscriptionError = domain_err.into();
        assert_eq!(sub_err.code(), ErrorCode::ValidationFailed);

        let infra: SubscriptionError =
            DomainError::new(ErrorCode::DatabaseError, "timeout").into();
        assert!(matches!(infra, SubscriptionError::Infrastructure(_)));
    }
}
