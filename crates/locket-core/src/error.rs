//! # Gateway Error Types
//!
//! Typed error handling for the order gateway and identity seams.
//! All gateway operations return `Result<T, GatewayError>`.

use thiserror::Error;

/// Message returned when a checkout request lacks its required fields.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing amount or description in request body";

/// Core error type for all order gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Caller input missing or malformed. The message is safe to return verbatim.
    #[error("{0}")]
    Validation(String),

    /// Deployment misconfiguration (missing credentials, bad endpoint)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The processor refused the credential exchange
    #[error("Payment processor authentication failed: {0}")]
    UpstreamAuth(String),

    /// The processor refused the order creation
    #[error("Failed to create order: {0}")]
    UpstreamOrder(String),

    /// Network/HTTP error communicating with the processor
    #[error("Network error: {0}")]
    Network(String),

    /// Processor payload could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GatewayError {
    /// Shorthand for the missing-fields validation failure
    pub fn missing_fields() -> Self {
        GatewayError::Validation(MISSING_FIELDS_MESSAGE.to_string())
    }

    /// Returns true if the caller can fix this error by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, GatewayError::Validation(_))
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors raised by an identity provider
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The identity service could not be reached or answered unexpectedly
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),

    /// The identity service refused the operation
    #[error("Identity service rejected the request: {0}")]
    Rejected(String),
}

/// Result type alias for identity operations
pub type IdentityResult<T> = Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::missing_fields().status_code(), 400);
        assert_eq!(
            GatewayError::Configuration("PAYPAL_CLIENT_ID not set".into()).status_code(),
            500
        );
        assert_eq!(GatewayError::UpstreamAuth("denied".into()).status_code(), 500);
        assert_eq!(GatewayError::UpstreamOrder("denied".into()).status_code(), 500);
        assert_eq!(GatewayError::Network("refused".into()).status_code(), 500);
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        assert_eq!(
            GatewayError::missing_fields().to_string(),
            "Missing amount or description in request body"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(GatewayError::Validation("bad amount".into()).is_client_error());
        assert!(!GatewayError::Serialization("eof".into()).is_client_error());
    }
}
