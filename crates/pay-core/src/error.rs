//! # Payment Error Types
//!
//! Typed error handling for the payments API.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Message returned when `amount` is missing, non-numeric or not positive.
pub const INVALID_AMOUNT_MESSAGE: &str = "Некорректная сумма платежа";

/// Message returned when the request body is not well-formed JSON.
pub const INVALID_JSON_MESSAGE: &str = "Некорректный JSON в теле запроса";

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Missing or malformed session fields
    #[error("{0}")]
    Validation(String),

    /// Request body is not well-formed structured data
    #[error("{0}")]
    Parse(String),

    /// Configuration errors (unknown provider, bad defaults)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PaymentError {
    /// Validation error for an unusable `amount` field
    pub fn invalid_amount() -> Self {
        PaymentError::Validation(INVALID_AMOUNT_MESSAGE.to_string())
    }

    /// Parse error for a body that is not valid JSON
    pub fn invalid_json() -> Self {
        PaymentError::Parse(INVALID_JSON_MESSAGE.to_string())
    }

    /// Returns true if the caller can fix the request and try again
    pub fn is_client_error(&self) -> bool {
        matches!(self, PaymentError::Validation(_) | PaymentError::Parse(_))
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Validation(_) => 400,
            PaymentError::Parse(_) => 400,
            PaymentError::Configuration(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
