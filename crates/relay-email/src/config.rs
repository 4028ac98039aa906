//! Email Configuration
//!
//! Backend selection from the process environment:
//!
//! | variable | meaning |
//! |---|---|
//! | `RESEND_API_KEY` | selects the Resend backend |
//! | `SMTP_USER`, `SMTP_PASSWORD` | select the SMTP backend when no API key is set |
//! | `SMTP_HOST`, `SMTP_PORT` | relay location (default `smtp.gmail.com:587`) |
//! | `EMAIL_FROM` | sender address |
//! | `REPLY_TO_EMAIL` | default reply-to |

use std::sync::Arc;

use crate::error::{EmailError, Result};
use crate::mailer::{Mailer, parse_address};
use crate::resend::ResendMailer;
use crate::smtp::{SmtpMailer, SmtpSettings};

/// Sender used with Resend when `EMAIL_FROM` is unset
pub const DEFAULT_RESEND_FROM: &str = "onboarding@resend.dev";

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Which provider delivers mail
#[derive(Clone, Debug)]
pub enum EmailBackend {
    Resend { api_key: String },
    Smtp(SmtpSettings),
}

/// Email delivery configuration
#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub backend: EmailBackend,
    pub from_address: String,
    pub reply_to: Option<String>,
}

impl EmailConfig {
    /// Read configuration from environment variables
    ///
    /// Returns `Ok(None)` when no credentials are present at all.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let (backend, default_from) = if let Some(api_key) = var("RESEND_API_KEY") {
            (EmailBackend::Resend { api_key }, DEFAULT_RESEND_FROM.to_owned())
        } else if let (Some(username), Some(password)) = (var("SMTP_USER"), var("SMTP_PASSWORD")) {
            let port = match var("SMTP_PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|_| EmailError::Config(format!("invalid SMTP_PORT: {port}")))?,
                None => DEFAULT_SMTP_PORT,
            };
            let settings = SmtpSettings {
                host: var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.into()),
                port,
                username: username.clone(),
                password,
            };
            (EmailBackend::Smtp(settings), username)
        } else {
            return Ok(None);
        };

        let from_address = var("EMAIL_FROM").unwrap_or(default_from);
        parse_address(&from_address)
            .map_err(|_| EmailError::Config(format!("invalid sender address: {from_address}")))?;

        let reply_to = var("REPLY_TO_EMAIL");
        if let Some(reply_to) = &reply_to {
            parse_address(reply_to)
                .map_err(|_| EmailError::Config(format!("invalid REPLY_TO_EMAIL: {reply_to}")))?;
        }

        Ok(Some(Self {
            backend,
            from_address,
            reply_to,
        }))
    }

    /// Backend name, for health reporting
    pub const fn provider_name(&self) -> &'static str {
        match self.backend {
            EmailBackend::Resend { .. } => "resend",
            EmailBackend::Smtp(_) => "smtp",
        }
    }

    /// Where the test probe goes when the caller names no recipient
    pub fn default_recipient(&self) -> &str {
        self.reply_to.as_deref().unwrap_or(&self.from_address)
    }

    /// Construct the configured mailer
    pub fn build_mailer(&self) -> Result<Arc<dyn Mailer>> {
        let mailer: Arc<dyn Mailer> = match &self.backend {
            EmailBackend::Resend { api_key } => Arc::new(
                ResendMailer::new(api_key.clone(), self.from_address.clone())
                    .with_reply_to(self.reply_to.clone()),
            ),
            EmailBackend::Smtp(settings) => Arc::new(
                SmtpMailer::new(settings, self.from_address.clone())?
                    .with_reply_to(self.reply_to.clone()),
            ),
        };
        Ok(mailer)
    }
}
