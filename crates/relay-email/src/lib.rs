//! # relay-email
//!
//! Transactional email delivery.
//!
//! ## Backends
//!
//! - **Resend** (preferred when `RESEND_API_KEY` is set): JSON over HTTPS
//! - **SMTP**: any authenticated relay, via lettre
//!
//! Both sit behind the [`Mailer`] trait. Delivery is fire-and-report: the
//! provider's immediate accept/reject is the only outcome, nothing is retried.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_email::{EmailConfig, OutgoingEmail};
//!
//! let config = EmailConfig::from_env()?.expect("email configured");
//! let mailer = config.build_mailer()?;
//!
//! let email = OutgoingEmail::new("customer@example.com", "Your invoice", html)
//!     .from_name(Some("Acme Plumbing"));
//! mailer.send(&email).await?;
//! ```

mod config;
mod error;
mod mailer;
mod resend;
mod smtp;

pub use config::{EmailBackend, EmailConfig};
pub use error::{EmailError, Result};
pub use mailer::{Mailer, OutgoingEmail, SendReceipt, format_sender, parse_address};
pub use resend::ResendMailer;
pub use smtp::{SmtpMailer, SmtpSettings, build_message};
