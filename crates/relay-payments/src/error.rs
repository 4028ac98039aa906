//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Amount missing, zero, negative or too large to charge
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Session id that the provider would never have issued
    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),

    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Whether the caller sent something unusable
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidAmount(_) | Self::InvalidSessionId(_))
    }

    /// Message safe to return to the caller
    ///
    /// Provider failures carry the provider's own message.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidAmount(_) => "Invalid amount".into(),
            Self::InvalidSessionId(_) => "Invalid session ID".into(),
            Self::Stripe(msg) => msg.clone(),
            Self::Config(_) => "Payment service configuration error".into(),
        }
    }
}

impl From<stripe::StripeError> for PaymentError {
    fn from(err: stripe::StripeError) -> Self {
        match err {
            stripe::StripeError::Stripe(request) => Self::Stripe(
                request
                    .message
                    .unwrap_or_else(|| format!("request failed with status {}", request.http_status)),
            ),
            other => Self::Stripe(other.to_string()),
        }
    }
}
