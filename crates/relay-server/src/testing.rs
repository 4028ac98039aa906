//! Recording provider doubles for router tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use relay_email::{EmailError, Mailer, OutgoingEmail, SendReceipt};
use relay_payments::{
    CheckoutPlan, CheckoutSession, PaymentError, PaymentGateway, PaymentStatus, from_minor_units,
};

use crate::state::AppState;

/// Payment gateway that records plans and answers from canned data
#[derive(Default)]
pub struct MockGateway {
    pub plans: Mutex<Vec<CheckoutPlan>>,
    pub fail_with: Option<String>,
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_checkout_session(
        &self,
        plan: &CheckoutPlan,
    ) -> relay_payments::Result<CheckoutSession> {
        self.plans.lock().unwrap().push(plan.clone());
        if let Some(message) = &self.fail_with {
            return Err(PaymentError::Stripe(message.clone()));
        }
        Ok(CheckoutSession {
            session_id: "cs_test_123".into(),
            url: "https://checkout.stripe.com/c/pay/cs_test_123".into(),
        })
    }

    async fn session_status(&self, session_id: &str) -> relay_payments::Result<PaymentStatus> {
        if !session_id.starts_with("cs_") {
            return Err(PaymentError::InvalidSessionId(session_id.to_owned()));
        }
        Ok(PaymentStatus {
            status: "paid".into(),
            customer_email: Some("sam@example.com".into()),
            amount_total: Some(from_minor_units(4999)),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mailer that records every accepted message
#[derive(Default)]
pub struct MockMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    pub fail_with: Option<String>,
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: &OutgoingEmail) -> relay_email::Result<SendReceipt> {
        if let Some(message) = &self.fail_with {
            return Err(EmailError::Provider(message.clone()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(SendReceipt {
            id: Some("msg_test".into()),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// State with both providers mocked
pub fn state_with(gateway: Arc<MockGateway>, mailer: Arc<MockMailer>) -> AppState {
    AppState {
        payments: Some(gateway),
        mailer: Some(mailer),
        test_recipient: Some("owner@example.com".into()),
        app_origin: "http://localhost:5173".into(),
    }
}

/// State with nothing configured
pub fn unconfigured_state() -> AppState {
    AppState {
        payments: None,
        mailer: None,
        test_recipient: None,
        app_origin: "http://localhost:5173".into(),
    }
}
