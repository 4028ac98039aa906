//! relay HTTP Server
//!
//! Axum-based server that opens Stripe checkout sessions and sends branded
//! transactional email on behalf of a front-end application, keeping provider
//! credentials server-side.

mod compose;
mod config;
mod error;
mod handlers;
mod routes;
mod state;

#[cfg(test)]
mod testing;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    match &config.stripe {
        Some(stripe) => tracing::info!(currency = ?stripe.currency, "✓ Stripe configured"),
        None => {
            tracing::warn!("⚠ Stripe not configured - payment endpoints disabled");
            tracing::warn!("  Set STRIPE_SECRET_KEY in .env");
        }
    }

    match &config.email {
        Some(email) => tracing::info!(
            provider = email.provider_name(),
            from = %email.from_address,
            "✓ Email configured"
        ),
        None => {
            tracing::warn!("⚠ Email not configured - email endpoints disabled");
            tracing::warn!("  Set RESEND_API_KEY, or SMTP_USER and SMTP_PASSWORD, in .env");
        }
    }

    let state = AppState::from_config(&config)?;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 relay server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                           - Health check");
    tracing::info!("  POST /create-checkout-session    - Create Stripe checkout");
    tracing::info!("  GET  /payment-status/{{id}}        - Checkout session status");
    tracing::info!("  POST /send-weekly-update         - Templated weekly update");
    tracing::info!("  POST /send-invoice               - Templated invoice");
    tracing::info!("  POST /send-quote                 - Templated quote");
    tracing::info!("  POST /send-email                 - Free-form email");
    tracing::info!("  POST /test-email                 - Verify email delivery");
    tracing::info!("");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
