//! Stripe Checkout Integration
//!
//! Implements [`PaymentGateway`] on top of Stripe's hosted checkout.

use async_trait::async_trait;
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionId, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData,
    CreateCheckoutSessionLineItemsPriceDataProductData, Currency,
};

use crate::checkout::{CheckoutPlan, CheckoutSession, from_minor_units};
use crate::error::{PaymentError, Result};
use crate::gateway::{PaymentGateway, PaymentStatus};

/// Currency used when `PAYMENT_CURRENCY` is unset
pub const DEFAULT_CURRENCY: Currency = Currency::USD;

/// Stripe credentials and checkout defaults
#[derive(Clone, Debug)]
pub struct StripeConfig {
    pub secret_key: String,
    pub currency: Currency,
}

impl StripeConfig {
    /// Read `STRIPE_SECRET_KEY` and `PAYMENT_CURRENCY` (default `usd`)
    ///
    /// Returns `Ok(None)` when no secret key is set.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(secret_key) = lookup("STRIPE_SECRET_KEY").filter(|key| !key.trim().is_empty())
        else {
            return Ok(None);
        };
        let currency = lookup("PAYMENT_CURRENCY")
            .filter(|code| !code.trim().is_empty())
            .map_or(Ok(DEFAULT_CURRENCY), |code| parse_currency(&code))?;

        Ok(Some(Self {
            secret_key: secret_key.trim().to_owned(),
            currency,
        }))
    }
}

/// Parse an ISO currency code such as `usd` or `EUR`
pub fn parse_currency(code: &str) -> Result<Currency> {
    serde_json::from_value(serde_json::Value::String(code.trim().to_lowercase()))
        .map_err(|_| PaymentError::Config(format!("unsupported currency: {code}")))
}

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
    currency: Currency,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            client: Client::new(config.secret_key.clone()),
            currency: config.currency,
        }
    }

    /// Currency every session is created in
    pub const fn currency(&self) -> Currency {
        self.currency
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_checkout_session(&self, plan: &CheckoutPlan) -> Result<CheckoutSession> {
        let mut params = CreateCheckoutSession::new();
        params.customer_email = plan.customer_email.as_deref();
        params.success_url = Some(plan.redirects.success_url.as_str());
        params.cancel_url = Some(plan.redirects.cancel_url.as_str());
        params.mode = Some(CheckoutSessionMode::Payment);
        if !plan.metadata.is_empty() {
            params.metadata = Some(plan.metadata.clone());
        }

        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            quantity: Some(1),
            price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                currency: self.currency,
                unit_amount: Some(plan.unit_amount),
                product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: plan.product_name.clone(),
                    description: Some(plan.product_description.clone()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }]);

        let session = StripeCheckoutSession::create(&self.client, params).await?;

        let url = session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))?;

        tracing::info!(
            session_id = %session.id,
            amount = plan.unit_amount,
            "Created checkout session"
        );

        Ok(CheckoutSession {
            session_id: session.id.to_string(),
            url,
        })
    }

    async fn session_status(&self, session_id: &str) -> Result<PaymentStatus> {
        let id: CheckoutSessionId = session_id
            .parse()
            .map_err(|_| PaymentError::InvalidSessionId(session_id.to_owned()))?;

        let session = StripeCheckoutSession::retrieve(&self.client, &id, &[]).await?;

        let customer_email = session.customer_email.clone().or_else(|| {
            session
                .customer_details
                .as_ref()
                .and_then(|details| details.email.clone())
        });

        Ok(PaymentStatus {
            status: session.payment_status.as_str().to_owned(),
            customer_email,
            amount_total: session.amount_total.map(from_minor_units),
        })
    }

    fn name(&self) -> &str {
        "stripe"
    }
}
