//! Errors produced while ingesting a webhook delivery.

use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Failure modes of the webhook ingestion pipeline.
///
/// Only `Database` aborts a delivery once the payload has been validated;
/// ledger and notification failures are downgraded by the handler so the
/// gateway still receives an acknowledgement.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookError {
    /// The payload failed structural validation.
    InvalidPayload { reason: String },
    /// The shared-secret check failed.
    Unauthorized,
    /// A storage operation failed.
    Database { message: String, details: String },
    /// An outbound notification failed.
    Notification { message: String },
    /// Anything else that escaped the pipeline.
    Internal { message: String },
}

impl WebhookError {
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        WebhookError::InvalidPayload {
            reason: reason.into(),
        }
    }

    pub fn database(message: impl Into<String>, details: impl Into<String>) -> Self {
        WebhookError::Database {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn notification(message: impl Into<String>) -> Self {
        WebhookError::Notification {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        WebhookError::Internal {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            WebhookError::InvalidPayload { .. } => ErrorCode::InvalidPayload,
            WebhookError::Unauthorized => ErrorCode::Unauthorized,
            WebhookError::Database { .. } => ErrorCode::DatabaseError,
            WebhookError::Notification { .. } => ErrorCode::NotificationError,
            WebhookError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            WebhookError::InvalidPayload { reason } => reason.clone(),
            WebhookError::Unauthorized => "Unauthorized".to_string(),
            WebhookError::Database { message, .. } => message.clone(),
            WebhookError::Notification { message } => message.clone(),
            WebhookError::Internal { message } => message.clone(),
        }
    }
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookError::Database { message, details } => {
                write!(f, "{}: {}", message, details)
            }
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for WebhookError {}

impl From<WebhookError> for DomainError {
    fn from(error: WebhookError) -> Self {
        let mut details = HashMap::new();
        if let WebhookError::Database { details: d, .. } = &error {
            details.insert("details".to_string(), d.clone());
        }
        DomainError {
            code: error.code(),
            message: error.message(),
            details,
        }
    }
}

impl From<DomainError> for WebhookError {
    fn from(error: DomainError) -> Self {
        match error.code {
            ErrorCode::InvalidPayload | ErrorCode::ValidationFailed => {
                WebhookError::invalid_payload(error.message)
            }
            ErrorCode::Unauthorized => WebhookError::Unauthorized,
            ErrorCode::DatabaseError => {
                let details = error
                    .details
                    .get("details")
                    .cloned()
                    .unwrap_or_else(|| error.message.clone());
                WebhookError::database(error.message, details)
            }
            ErrorCode::NotificationError => WebhookError::notification(error.message),
            _ => WebhookError::internal(error.message),
        }
    }
}
