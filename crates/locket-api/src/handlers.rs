//! # Request Handlers
//!
//! Axum request handlers for the checkout API and the account header.
//! Every failure leaves this module as `{ "error": "<message>" }`.

use crate::identity::{session_token, SESSION_COOKIE};
use crate::state::AppState;
use crate::views;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::{cookie::Cookie, CookieJar};
use locket_core::{GatewayError, HeaderView, Identity, OrderRequest, LANDING_ROUTE};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create order request, as posted by the checkout page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Decimal amount, e.g. "10.00"
    #[serde(default)]
    pub amount: Option<String>,
    /// Purchase description shown to the buyer
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the prints ship to the buyer's address
    #[serde(default)]
    pub requires_shipping: Option<bool>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn gateway_error_to_response(err: GatewayError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "locket-print",
        "version": env!("CARGO_PKG_VERSION"),
        "payment_provider": state.gateway.provider_name(),
        "paypal_mode": state.gateway.environment(),
    }))
}

/// Create a PayPal order for the checkout
///
/// `POST /api/paypal/create-order`
#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!("Rejected create-order body: {}", rejection.body_text());
        gateway_error_to_response(GatewayError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    })?;

    let request = OrderRequest::from_parts(
        body.amount.as_deref(),
        body.description.as_deref(),
        body.requires_shipping,
    )
    .map_err(gateway_error_to_response)?;

    info!(
        "Creating order: provider={}, amount={}, requires_shipping={}",
        state.gateway.provider_name(),
        request.amount,
        request.requires_shipping
    );

    let order = state.gateway.create_order(&request).await.map_err(|e| {
        error!("Failed to create order: {}", e);
        gateway_error_to_response(e)
    })?;

    Ok(Json(order.into_inner()))
}

/// Account header fragment
///
/// `GET /partials/header`
pub async fn header_fragment(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Html<String>, StatusCode> {
    let identity = current_identity(&state, &headers, &jar).await;
    let view = HeaderView::for_identity(identity.as_ref());

    views::render_header(&view).map(Html).map_err(|e| {
        error!("Failed to render header: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Account header state as JSON
///
/// `GET /api/session`
pub async fn session_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Json<HeaderView> {
    let identity = current_identity(&state, &headers, &jar).await;
    Json(HeaderView::for_identity(identity.as_ref()))
}

/// Terminate the session and return to the landing page.
///
/// A provider failure is only logged: the browser gets `204` and stays put.
///
/// `POST /auth/sign-out`
#[instrument(skip_all)]
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap, jar: CookieJar) -> Response {
    if let Some(token) = session_token(&headers, &jar) {
        if let Err(e) = state.identity.sign_out(&token).await {
            error!("Sign-out failed: {}", e);
            return StatusCode::NO_CONTENT.into_response();
        }
        info!("Signed out via {}", state.identity.provider_name());
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to(LANDING_ROUTE)).into_response()
}

/// Resolve the caller's identity. Provider failures render as signed out.
async fn current_identity(state: &AppState, headers: &HeaderMap, jar: &CookieJar) -> Option<Identity> {
    let token = session_token(headers, jar)?;

    match state.identity.current_identity(&token).await {
        Ok(identity) => identity,
        Err(e) => {
            warn!("Identity lookup failed: {}", e);
            None
        }
    }
}
