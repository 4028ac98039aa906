//! Payment Gateway Strategy
//!
//! Handlers talk to the payment provider only through [`PaymentGateway`], so
//! the provider can be swapped (or mocked in tests) without touching them.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::checkout::{CheckoutPlan, CheckoutSession};
use crate::error::Result;

/// Snapshot of a checkout session as reported by the provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatus {
    /// `paid`, `unpaid` or `no_payment_required`
    pub status: String,

    pub customer_email: Option<String>,

    /// Total in currency units
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount_total: Option<Decimal>,
}

/// Payment provider trait (Strategy pattern)
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a hosted checkout session
    async fn create_checkout_session(&self, plan: &CheckoutPlan) -> Result<CheckoutSession>;

    /// Look up a previously created session
    async fn session_status(&self, session_id: &str) -> Result<PaymentStatus>;

    /// Provider name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_status_serializes_amount_as_number() {
        let status = PaymentStatus {
            status: "paid".into(),
            customer_email: Some("sam@example.com".into()),
            amount_total: Some(dec!(49.99)),
        };
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({"status": "paid", "customerEmail": "sam@example.com", "amountTotal": 49.99})
        );
    }
}
