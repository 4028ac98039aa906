//! Checkout Requests
//!
//! Turns the caller's loosely-typed checkout body into a provider-agnostic
//! [`CheckoutPlan`]: one line item, amount in minor units, redirect URLs and
//! string-only metadata.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PaymentError, Result};

/// Product name used when the caller sends no description
pub const DEFAULT_PRODUCT_NAME: &str = "Payment";

/// Product description used when the caller sends no customer name
pub const DEFAULT_PRODUCT_DESCRIPTION: &str = "Invoice payment";

/// Placeholder Stripe replaces with the real session id on redirect
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Request body for creating a checkout session
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Amount in currency units (e.g. `49.99`)
    #[serde(default)]
    pub amount: Option<Decimal>,

    #[serde(default)]
    pub customer_email: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub customer_name: Option<String>,

    /// Opaque caller metadata, forwarded to the provider
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Where the hosted checkout page sends the customer afterwards
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl RedirectUrls {
    /// Redirect targets under the front-end `origin`
    pub fn for_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            success_url: format!("{origin}/payment-success?session_id={SESSION_ID_PLACEHOLDER}"),
            cancel_url: format!("{origin}/payment-cancelled"),
        }
    }
}

/// Everything a provider needs to open a single-item checkout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutPlan {
    /// Amount in minor units (cents)
    pub unit_amount: i64,
    pub product_name: String,
    pub product_description: String,
    pub customer_email: Option<String>,
    pub metadata: HashMap<String, String>,
    pub redirects: RedirectUrls,
}

/// Result of creating a checkout session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    /// Provider session ID
    pub session_id: String,

    /// URL to redirect the customer to
    pub url: String,
}

impl CheckoutRequest {
    /// Validate the request and build the provider-agnostic plan
    pub fn plan(&self, redirects: RedirectUrls) -> Result<CheckoutPlan> {
        let amount = self
            .amount
            .ok_or_else(|| PaymentError::InvalidAmount("amount is required".into()))?;
        let unit_amount = to_minor_units(amount)?;

        let product_name = non_blank(self.description.as_deref())
            .unwrap_or(DEFAULT_PRODUCT_NAME)
            .to_owned();
        let product_description = non_blank(self.customer_name.as_deref()).map_or_else(
            || DEFAULT_PRODUCT_DESCRIPTION.to_owned(),
            |name| format!("Payment from {name}"),
        );

        let mut metadata = HashMap::new();
        if let Some(name) = non_blank(self.customer_name.as_deref()) {
            metadata.insert("customer_name".to_owned(), name.to_owned());
        }
        if let Some(extra) = &self.metadata {
            metadata.extend(flatten_metadata(extra));
        }

        Ok(CheckoutPlan {
            unit_amount,
            product_name,
            product_description,
            customer_email: non_blank(self.customer_email.as_deref()).map(str::to_owned),
            metadata,
            redirects,
        })
    }
}

/// Convert currency units to minor units: `round(amount × 100)`
///
/// Midpoints round away from zero. Non-positive amounts, and amounts that
/// round to zero cents, are rejected.
pub fn to_minor_units(amount: Decimal) -> Result<i64> {
    if amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidAmount(format!(
            "{amount} must be greater than zero"
        )));
    }

    let cents = amount
        .checked_mul(dec!(100))
        .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|c| c.to_i64())
        .ok_or_else(|| PaymentError::InvalidAmount(format!("{amount} is too large")))?;

    if cents == 0 {
        return Err(PaymentError::InvalidAmount(format!(
            "{amount} is less than one cent"
        )));
    }

    Ok(cents)
}

/// Convert minor units back to currency units
pub fn from_minor_units(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Provider metadata values must be strings
fn flatten_metadata(map: &Map<String, Value>) -> impl Iterator<Item = (String, String)> + '_ {
    map.iter().filter(|(_, v)| !v.is_null()).map(|(k, v)| {
        let value = match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        (k.clone(), value)
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> CheckoutRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(to_minor_units(dec!(49.99)).unwrap(), 4999);
        assert_eq!(to_minor_units(dec!(10)).unwrap(), 1000);
        assert_eq!(to_minor_units(dec!(0.015)).unwrap(), 2);
        assert_eq!(to_minor_units(dec!(19.994)).unwrap(), 1999);
        assert_eq!(to_minor_units(dec!(1.005)).unwrap(), 101);
    }

    #[test]
    fn test_minor_units_rejects_non_positive() {
        assert!(matches!(to_minor_units(dec!(0)), Err(PaymentError::InvalidAmount(_))));
        assert!(matches!(to_minor_units(dec!(-5)), Err(PaymentError::InvalidAmount(_))));
        assert!(matches!(to_minor_units(dec!(0.001)), Err(PaymentError::InvalidAmount(_))));
    }

    #[test]
    fn test_from_minor_units() {
        assert_eq!(from_minor_units(4999), dec!(49.99));
        assert_eq!(from_minor_units(100), dec!(1.00));
    }

    #[test]
    fn test_amount_from_json_number() {
        let req = request(json!({"amount": 49.99}));
        assert_eq!(req.amount, Some(dec!(49.99)));
    }

    #[test]
    fn test_redirects_for_origin() {
        let urls = RedirectUrls::for_origin("https://app.example.com/");
        assert_eq!(
            urls.success_url,
            "https://app.example.com/payment-success?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(urls.cancel_url, "https://app.example.com/payment-cancelled");
    }

    #[test]
    fn test_plan_defaults() {
        let plan = request(json!({"amount": 25}))
            .plan(RedirectUrls::for_origin("http://localhost:5173"))
            .unwrap();
        assert_eq!(plan.unit_amount, 2500);
        assert_eq!(plan.product_name, DEFAULT_PRODUCT_NAME);
        assert_eq!(plan.product_description, DEFAULT_PRODUCT_DESCRIPTION);
        assert_eq!(plan.customer_email, None);
        assert!(plan.metadata.is_empty());
    }

    #[test]
    fn test_plan_with_customer_details() {
        let plan = request(json!({
            "amount": "120.50",
            "customerEmail": "sam@example.com",
            "description": "Invoice #42",
            "customerName": "Sam Jones",
            "metadata": {"invoiceId": "inv_42", "items": 3, "note": null}
        }))
        .plan(RedirectUrls::for_origin("http://localhost:5173"))
        .unwrap();

        assert_eq!(plan.unit_amount, 12050);
        assert_eq!(plan.product_name, "Invoice #42");
        assert_eq!(plan.product_description, "Payment from Sam Jones");
        assert_eq!(plan.customer_email.as_deref(), Some("sam@example.com"));
        assert_eq!(plan.metadata.get("customer_name").map(String::as_str), Some("Sam Jones"));
        assert_eq!(plan.metadata.get("invoiceId").map(String::as_str), Some("inv_42"));
        assert_eq!(plan.metadata.get("items").map(String::as_str), Some("3"));
        assert!(!plan.metadata.contains_key("note"));
    }

    #[test]
    fn test_plan_requires_amount() {
        let err = CheckoutRequest::default()
            .plan(RedirectUrls::for_origin("http://localhost"))
            .unwrap_err();
        assert!(err.is_client_error());
    }
}
