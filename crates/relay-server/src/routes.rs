//! Router

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    create_checkout_session, health_check, missing_session_id, not_found, payment_status,
    send_email, send_invoice, send_quote, send_weekly_update, test_email,
};
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    // The front-end is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/", get(health_check))

        // Payments
        .route("/create-checkout-session", post(create_checkout_session))
        .route("/payment-status", get(missing_session_id))
        .route("/payment-status/", get(missing_session_id))
        .route("/payment-status/{session_id}", get(payment_status))

        // Email
        .route("/send-weekly-update", post(send_weekly_update))
        .route("/send-invoice", post(send_invoice))
        .route("/send-quote", post(send_quote))
        .route("/send-email", post(send_email))
        .route("/test-email", post(test_email))
        .fallback(not_found)

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
