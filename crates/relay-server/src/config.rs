//! Server Configuration
//!
//! Gathered once at start-up and handed to [`AppState`](crate::state::AppState).

use anyhow::Context;
use relay_email::EmailConfig;
use relay_payments::StripeConfig;

/// Front-end origin used for checkout redirects when a request has no `Origin`
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:5173";

pub const DEFAULT_PORT: u16 = 3001;

/// Process-wide configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// `host:port` to listen on
    pub bind_addr: String,

    /// Fallback origin for checkout redirect URLs
    pub app_origin: String,

    /// `None` disables the payment endpoints
    pub stripe: Option<StripeConfig>,

    /// `None` disables the email endpoints
    pub email: Option<EmailConfig>,
}

impl ServerConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(addr) if !addr.trim().is_empty() => addr,
            _ => {
                let port = match std::env::var("PORT") {
                    Ok(port) => port
                        .trim()
                        .parse::<u16>()
                        .with_context(|| format!("invalid PORT: {port}"))?,
                    Err(_) => DEFAULT_PORT,
                };
                format!("0.0.0.0:{port}")
            }
        };

        let app_origin = std::env::var("APP_ORIGIN")
            .ok()
            .filter(|origin| !origin.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APP_ORIGIN.into());

        let stripe = StripeConfig::from_env().context("invalid payment configuration")?;
        let email = EmailConfig::from_env().context("invalid email configuration")?;

        Ok(Self {
            bind_addr,
            app_origin,
            stripe,
            email,
        })
    }
}
