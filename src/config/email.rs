//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: String,

    /// From email address
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Optional CC address copied on welcome emails
    pub welcome_cc: Option<String>,

    /// Path to the welcome email HTML template
    #[serde(default = "default_welcome_template_path")]
    pub welcome_template_path: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resend_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("RESEND_API_KEY"));
        }
        if !self.resend_api_key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if self.from_email.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL_FROM_EMAIL"));
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if let Some(cc) = &self.welcome_cc {
            if !cc.contains('@') {
                return Err(ValidationError::InvalidCcEmail);
            }
        }
        if self.welcome_template_path.is_empty() {
            return Err(ValidationError::MissingRequired(
                "EMAIL_WELCOME_TEMPLATE_PATH",
            ));
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: String::new(),
            from_email: String::new(),
            from_name: default_from_name(),
            welcome_cc: None,
            welcome_template_path: default_welcome_template_path(),
        }
    }
}

fn default_from_name() -> String {
    "Pagos".to_string()
}

fn default_welcome_template_path() -> String {
    "templates/welcome.html".to_string()
}
