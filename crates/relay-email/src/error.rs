//! Email Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, EmailError>;

/// Email delivery errors
#[derive(Error, Debug)]
pub enum EmailError {
    /// Recipient, sender or reply-to is not a usable address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Provider rejected the message
    #[error("Email provider error: {0}")]
    Provider(String),

    /// HTTP transport failure talking to the provider API
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// SMTP transport failure
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Message could not be assembled
    #[error("Message build error: {0}")]
    Build(#[from] lettre::error::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EmailError {
    /// Whether the caller sent something unusable
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidAddress(_))
    }
}
