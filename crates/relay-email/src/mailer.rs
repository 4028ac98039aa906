//! Mailer Strategy
//!
//! Every delivery backend implements [`Mailer`]. Handlers only ever see
//! `Arc<dyn Mailer>`.

use async_trait::async_trait;
use lettre::Address;
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};

use crate::error::{EmailError, Result};

/// A fully rendered message ready for delivery
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,

    /// Display name for the From header
    #[serde(default)]
    pub from_name: Option<String>,

    /// Overrides the configured reply-to address
    #[serde(default)]
    pub reply_to: Option<String>,
}

impl OutgoingEmail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
            from_name: None,
            reply_to: None,
        }
    }

    #[must_use]
    pub fn from_name(mut self, name: Option<impl Into<String>>) -> Self {
        self.from_name = name.map(Into::into);
        self
    }

    #[must_use]
    pub fn reply_to(mut self, address: Option<impl Into<String>>) -> Self {
        self.reply_to = address.map(Into::into);
        self
    }
}

/// Provider acknowledgment
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    /// Provider message id, when the provider returns one
    pub id: Option<String>,
}

/// Email delivery trait (Strategy pattern)
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand a message to the provider; returns once it is accepted or rejected
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt>;

    /// Backend name (`resend`, `smtp`)
    fn name(&self) -> &str;
}

/// Parse and validate a single address
pub fn parse_address(raw: &str) -> Result<Address> {
    raw.trim()
        .parse()
        .map_err(|_| EmailError::InvalidAddress(raw.to_owned()))
}

/// `Name <address>` header value, or the bare address without a name
///
/// The display name is quoted when it contains header specials such as `,`.
pub fn format_sender(name: Option<&str>, address: &str) -> Result<String> {
    let name = name
        .map(|n| n.replace(['\r', '\n'], "").trim().to_owned())
        .filter(|n| !n.is_empty());

    Ok(Mailbox::new(name, parse_address(address)?).to_string())
}
