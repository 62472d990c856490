//! Resend implementation of the `EmailSender` port.
//!
//! Sends over the Resend HTTP API (<https://resend.com>). Both notices go
//! through the same `/emails` endpoint; the welcome email additionally loads
//! its HTML template from disk before each send so the template can be
//! swapped without a restart.

use async_trait::async_trait;
use serde::Serialize;

use crate::config::EmailConfig;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{EmailSender, PaymentResultNotice, WelcomeNotice};

use super::templates;

const RESEND_API_BASE_URL: &str = "https://api.resend.com";

/// Email adapter backed by the Resend API.
pub struct ResendMailer {
    config: EmailConfig,
    http_client: reqwest::Client,
    api_base_url: String,
}

/// Request body for Resend's `POST /emails`.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc: Option<Vec<&'a str>>,
    subject: &'a str,
    html: &'a str,
}

impl ResendMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
            api_base_url: RESEND_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    async fn deliver(
        &self,
        to: &str,
        cc: Option<&str>,
        subject: &str,
        html: &str,
    ) -> Result<(), DomainError> {
        let url = format!("{}/emails", self.api_base_url);
        let from = self.config.from_header();
        let body = SendEmailRequest {
            from: &from,
            to: vec![to],
            cc: cc.map(|address| vec![address]),
            subject,
            html,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.resend_api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::NotificationError,
                    format!("Resend request failed: {}", e),
                )
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Resend send failed");
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                format!("Resend API error: {}", error_text),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl EmailSender for ResendMailer {
    async fn send_payment_result(&self, notice: &PaymentResultNotice) -> Result<(), DomainError> {
        let subject = templates::payment_result_subject(notice);
        let html = templates::payment_result_body(notice, &Timestamp::now());

        self.deliver(&notice.to, None, &subject, &html).await?;

        tracing::info!(to = %notice.to, order_id = %notice.order_id, "Payment result email sent");
        Ok(())
    }

    async fn send_welcome(&self, notice: &WelcomeNotice) -> Result<(), DomainError> {
        let template = tokio::fs::read_to_string(&self.config.welcome_template_path)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::NotificationError,
                    format!(
                        "Failed to read welcome template {}: {}",
                        self.config.welcome_template_path, e
                    ),
                )
            })?;
        let html = templates::personalize_welcome(&template, notice.payer_name.as_deref());

        self.deliver(
            &notice.to,
            self.config.welcome_cc.as_deref(),
            templates::WELCOME_SUBJECT,
            &html,
        )
        .await?;

        tracing::info!(to = %notice.to, order_id = %notice.order_id, "Welcome email sent");
        Ok(())
    }
}
