//! Application State

use std::sync::Arc;

use relay_email::Mailer;
use relay_payments::{PaymentGateway, StripeClient};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider (optional - None if not configured)
    pub payments: Option<Arc<dyn PaymentGateway>>,

    /// Email provider (optional - None if not configured)
    pub mailer: Option<Arc<dyn Mailer>>,

    /// Recipient of `/test-email` when the request names none
    pub test_recipient: Option<String>,

    /// Fallback origin for checkout redirects
    pub app_origin: Arc<str>,
}

impl AppState {
    /// Build provider clients from configuration
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let payments = config
            .stripe
            .as_ref()
            .map(|stripe| Arc::new(StripeClient::new(stripe)) as Arc<dyn PaymentGateway>);

        let mailer = config
            .email
            .as_ref()
            .map(relay_email::EmailConfig::build_mailer)
            .transpose()?;

        Ok(Self {
            payments,
            mailer,
            test_recipient: config
                .email
                .as_ref()
                .map(|email| email.default_recipient().to_owned()),
            app_origin: config.app_origin.as_str().into(),
        })
    }

    pub fn payments(&self) -> Result<&dyn PaymentGateway, ApiError> {
        self.payments
            .as_deref()
            .ok_or(ApiError::NotConfigured("Stripe"))
    }

    pub fn mailer(&self) -> Result<&dyn Mailer, ApiError> {
        self.mailer
            .as_deref()
            .ok_or(ApiError::NotConfigured("Email service"))
    }
}
