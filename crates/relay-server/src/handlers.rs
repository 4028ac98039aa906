//! HTTP Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Path, State},
    http::{HeaderMap, header::ORIGIN},
};
use relay_email::OutgoingEmail;
use relay_payments::{CheckoutRequest, CheckoutSession, PaymentStatus, RedirectUrls};
use relay_templates::{CompanySettings, MergeData, Template};
use serde::{Deserialize, Serialize};

use crate::compose::{self, EmailKind};
use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

/// JSON body extractor that reports malformed input as `{ "error": ... }`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub payments_configured: bool,
    pub email_configured: bool,
    pub email_provider: Option<String>,
}

/// Body of `/send-weekly-update`, `/send-invoice` and `/send-quote`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatedEmailRequest {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub template: Option<Template>,
    #[serde(default)]
    pub data: Option<MergeData>,
    #[serde(default)]
    pub company_settings: Option<CompanySettings>,
    /// Invoice only
    #[serde(default)]
    pub payment_link: Option<String>,
}

/// Body of `/send-email`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericEmailRequest {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub company_settings: Option<CompanySettings>,
}

/// Body of `/test-email`
#[derive(Debug, Default, Deserialize)]
pub struct TestEmailRequest {
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        payments_configured: state.payments.is_some(),
        email_configured: state.mailer.is_some(),
        email_provider: state.mailer.as_ref().map(|m| m.name().to_owned()),
    })
}

/// Create a hosted checkout session
pub async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<CheckoutRequest>,
) -> Result<Json<CheckoutSession>, ApiError> {
    let payments = state.payments()?;

    let origin = headers
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "null")
        .unwrap_or(&*state.app_origin);

    let plan = payload.plan(RedirectUrls::for_origin(origin))?;
    let session = payments.create_checkout_session(&plan).await?;

    Ok(Json(session))
}

/// Relay the provider's view of a checkout session
pub async fn payment_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<PaymentStatus>, ApiError> {
    let payments = state.payments()?;

    if session_id.trim().is_empty() {
        return Err(ApiError::bad_request("Session ID is required"));
    }

    let status = payments.session_status(session_id.trim()).await?;
    Ok(Json(status))
}

/// `/payment-status` reached without a session id
pub async fn missing_session_id(State(state): State<AppState>) -> ApiError {
    match state.payments() {
        Ok(_) => ApiError::bad_request("Session ID is required"),
        Err(err) => err,
    }
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn send_weekly_update(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TemplatedEmailRequest>,
) -> Result<Json<SendResponse>, ApiError> {
    send_templated(&state, EmailKind::WeeklyUpdate, payload).await
}

pub async fn send_invoice(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TemplatedEmailRequest>,
) -> Result<Json<SendResponse>, ApiError> {
    send_templated(&state, EmailKind::Invoice, payload).await
}

pub async fn send_quote(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TemplatedEmailRequest>,
) -> Result<Json<SendResponse>, ApiError> {
    send_templated(&state, EmailKind::Quote, payload).await
}

/// Free-form email with branding
pub async fn send_email(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<GenericEmailRequest>,
) -> Result<Json<SendResponse>, ApiError> {
    state.mailer()?;
    let email = compose::generic(payload)?;
    deliver(&state, &email, "Email").await
}

/// Send the canned verification message
///
/// The body is optional; without a recipient the configured reply-to (or
/// sender) address receives the probe.
pub async fn test_email(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SendResponse>, ApiError> {
    let mailer = state.mailer()?;

    let request: TestEmailRequest = if body.iter().all(u8::is_ascii_whitespace) {
        TestEmailRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))?
    };

    let to = request
        .to
        .as_deref()
        .map(str::trim)
        .filter(|to| !to.is_empty())
        .or(state.test_recipient.as_deref())
        .ok_or_else(|| ApiError::bad_request("Recipient email (to) is required"))?;

    let email = compose::test_probe(to, mailer.name());
    deliver(&state, &email, "Test email").await
}

async fn send_templated(
    state: &AppState,
    kind: EmailKind,
    payload: TemplatedEmailRequest,
) -> Result<Json<SendResponse>, ApiError> {
    state.mailer()?;
    let email = compose::templated(kind, payload)?;
    deliver(state, &email, kind.label()).await
}

async fn deliver(
    state: &AppState,
    email: &OutgoingEmail,
    label: &str,
) -> Result<Json<SendResponse>, ApiError> {
    let mailer = state.mailer()?;
    let receipt = mailer.send(email).await?;

    tracing::info!(
        kind = %label,
        to = %email.to,
        subject = %email.subject,
        provider = mailer.name(),
        message_id = ?receipt.id,
        "Email sent"
    );

    Ok(Json(SendResponse {
        success: true,
        message: format!("{label} sent successfully"),
    }))
}
