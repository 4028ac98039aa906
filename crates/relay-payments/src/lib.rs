//! # relay-payments
//!
//! Hosted checkout sessions and payment status lookups.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────────────┐
//! │  Front-end  │────▶│  Stripe Hosted  │────▶│  Front-end          │
//! │  (invoice)  │     │  Checkout Page  │     │  /payment-success   │
//! └─────────────┘     └─────────────────┘     └─────────────────────┘
//! ```
//!
//! The caller sends an amount in currency units; it is converted to minor
//! units (`round(amount × 100)`) and charged as a single line item.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_payments::{CheckoutRequest, PaymentGateway, RedirectUrls, StripeClient, StripeConfig};
//!
//! let config = StripeConfig::from_env()?.expect("stripe configured");
//! let client = StripeClient::new(&config);
//!
//! let plan = CheckoutRequest {
//!     amount: Some(dec!(49.99)),
//!     customer_email: Some("user@example.com".into()),
//!     ..Default::default()
//! }
//! .plan(RedirectUrls::for_origin("https://app.example.com"))?;
//!
//! let session = client.create_checkout_session(&plan).await?;
//! // Redirect user to: session.url
//! ```

mod checkout;
mod error;
mod gateway;
mod stripe_client;

pub use checkout::{
    CheckoutPlan, CheckoutRequest, CheckoutSession, RedirectUrls, from_minor_units,
    to_minor_units,
};
pub use error::{PaymentError, Result};
pub use gateway::{PaymentGateway, PaymentStatus};
pub use stripe_client::{DEFAULT_CURRENCY, StripeClient, StripeConfig, parse_currency};
