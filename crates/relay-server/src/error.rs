//! API Error Responses
//!
//! Every failure leaves the server as `{ "error": "..." }`:
//!
//! - bad input and missing provider configuration → 400
//! - unknown routes → 404
//! - anything the payment or email provider reports → 500

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_email::EmailError;
use relay_payments::PaymentError;
use serde::Serialize;
use thiserror::Error;

/// Error returned by every handler
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid request field
    #[error("{0}")]
    BadRequest(String),

    /// Provider credentials were not supplied at start-up
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    /// Payment or email provider failure
    #[error("{0}")]
    Provider(String),

    /// No route matches the request
    #[error("Not found")]
    NotFound,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::NotConfigured(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Provider request failed");
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Config(_) => Self::NotConfigured("Stripe"),
            err if err.is_client_error() => Self::BadRequest(err.user_message()),
            err => Self::Provider(err.user_message()),
        }
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::Config(_) => Self::NotConfigured("Email service"),
            err if err.is_client_error() => Self::BadRequest(err.to_string()),
            err => Self::Provider(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy() {
        assert_eq!(ApiError::bad_request("to is required").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotConfigured("Stripe").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotConfigured("Stripe").to_string(), "Stripe not configured");
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Provider("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_payment_errors() {
        let err: ApiError = PaymentError::InvalidAmount("-1".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid amount");

        let err: ApiError = PaymentError::Stripe("Your card was declined.".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Your card was declined.");
    }

    #[test]
    fn test_email_errors() {
        let err: ApiError = EmailError::InvalidAddress("nobody".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = EmailError::Provider("Resend returned 403".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("Resend returned 403"));
    }
}
