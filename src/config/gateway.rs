//! Payments gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use subtle::ConstantTimeEq;

use super::error::ValidationError;

/// Payments gateway configuration
///
/// The gateway authenticates its webhook calls with a static bearer token.
/// When `shared_secret` is unset the webhook endpoint accepts unauthenticated
/// calls, which is how staging gateways are pointed at this service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayConfig {
    /// Bearer token expected on `Authorization` headers from the gateway
    pub shared_secret: Option<SecretString>,
}

impl GatewayConfig {
    /// Check whether webhook calls must present a bearer token
    pub fn auth_required(&self) -> bool {
        self.shared_secret.is_some()
    }

    /// Compare a presented `Authorization` header against the configured token.
    ///
    /// Returns `true` when no token is configured, or when the header equals
    /// `Bearer <shared_secret>`. Comparison is constant-time so timing does
    /// not leak how much of the token matched.
    pub fn authorizes(&self, authorization: Option<&str>) -> bool {
        let Some(secret) = &self.shared_secret else {
            return true;
        };
        let Some(provided) = authorization else {
            return false;
        };

        let expected = format!("Bearer {}", secret.expose_secret());
        expected.as_bytes().ct_eq(provided.as_bytes()).unwrap_u8() == 1
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(secret) = &self.shared_secret {
            if secret.expose_secret().is_empty() {
                return Err(ValidationError::EmptySharedSecret);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret(secret: &str) -> GatewayConfig {
        GatewayConfig {
            shared_secret: Some(SecretString::new(secret.to_string())),
        }
    }

    #[test]
    fn test_auth_not_required_by_default() {
        let config = GatewayConfig::default();
        assert!(!config.auth_required());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_auth_required_with_secret() {
        let config = with_secret("gw_token_123");
        assert!(config.auth_required());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_secret() {
        let config = with_secret("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_authorizes_without_secret_accepts_anything() {
        let config = GatewayConfig::default();
        assert!(config.authorizes(None));
        assert!(config.authorizes(Some("Bearer whatever")));
    }

    #[test]
    fn test_authorizes_exact_bearer_match() {
        let config = with_secret("gw_token_123");
        assert!(config.authorizes(Some("Bearer gw_token_123")));
    }

    #[test]
    fn test_authorizes_rejects_missing_header() {
        let config = with_secret("gw_token_123");
        assert!(!config.authorizes(None));
    }

    #[test]
    fn test_authorizes_rejects_wrong_token() {
        let config = with_secret("gw_token_123");
        assert!(!config.authorizes(Some("Bearer gw_token_456")));
        assert!(!config.authorizes(Some("gw_token_123")));
        assert!(!config.authorizes(Some("bearer gw_token_123")));
    }
}
