//! SMTP Relay Backend
//!
//! Submits mail through an authenticated relay (Gmail, Fastmail, a company
//! mailbox) using lettre's async transport.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::error::Result;
use crate::mailer::{Mailer, OutgoingEmail, SendReceipt, parse_address};

/// Port that speaks TLS from the first byte; every other port uses STARTTLS
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP connection settings
#[derive(Clone, Debug)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// SMTP email provider
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    reply_to: Option<String>,
}

impl SmtpMailer {
    /// Build the transport; no connection is opened until the first send
    pub fn new(settings: &SmtpSettings, from_address: impl Into<String>) -> Result<Self> {
        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from_address: from_address.into(),
            reply_to: None,
        })
    }

    /// Default reply-to for messages that don't set one
    #[must_use]
    pub fn with_reply_to(mut self, reply_to: Option<String>) -> Self {
        self.reply_to = reply_to;
        self
    }
}

/// Assemble the MIME message for `email`
pub fn build_message(
    email: &OutgoingEmail,
    from_address: &str,
    default_reply_to: Option<&str>,
) -> Result<Message> {
    let from_name = email
        .from_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned);
    let from = Mailbox::new(from_name, parse_address(from_address)?);
    let to = Mailbox::new(None, parse_address(&email.to)?);

    let mut builder = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str());

    if let Some(reply_to) = email.reply_to.as_deref().or(default_reply_to) {
        builder = builder.reply_to(Mailbox::new(None, parse_address(reply_to)?));
    }

    Ok(builder
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt> {
        let message = build_message(email, &self.from_address, self.reply_to.as_deref())?;
        let response = self.transport.send(message).await?;
        let id = response.message().next().map(str::to_owned);

        Ok(SendReceipt { id })
    }

    fn name(&self) -> &str {
        "smtp"
    }
}
