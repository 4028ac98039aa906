//! Resend HTTP API Backend
//!
//! <https://resend.com/docs/api-reference/emails/send-email>

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{EmailError, Result};
use crate::mailer::{Mailer, OutgoingEmail, SendReceipt, format_sender, parse_address};

/// Production API endpoint
pub const RESEND_API_URL: &str = "https://api.resend.com";

#[derive(Serialize)]
struct SendRequest<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// Resend email provider
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    from_address: String,
    reply_to: Option<String>,
}

impl ResendMailer {
    /// Create a provider for the production API
    pub fn new(api_key: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: RESEND_API_URL.into(),
            from_address: from_address.into(),
            reply_to: None,
        }
    }

    /// Point at a different API host (staging, local test server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Default reply-to for messages that don't set one
    #[must_use]
    pub fn with_reply_to(mut self, reply_to: Option<String>) -> Self {
        self.reply_to = reply_to;
        self
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt> {
        parse_address(&email.to)?;
        let reply_to = email.reply_to.as_deref().or(self.reply_to.as_deref());
        if let Some(reply_to) = reply_to {
            parse_address(reply_to)?;
        }

        let body = SendRequest {
            from: format_sender(email.from_name.as_deref(), &self.from_address)?,
            to: [email.to.trim()],
            subject: &email.subject,
            html: &email.html,
            reply_to,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(text);
            tracing::warn!(status = %status, message = %message, "Resend rejected email");
            return Err(EmailError::Provider(format!("Resend returned {status}: {message}")));
        }

        let receipt: SendResponse = response.json().await?;
        Ok(SendReceipt { id: receipt.id })
    }

    fn name(&self) -> &str {
        "resend"
    }
}
