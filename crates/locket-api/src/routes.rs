//! # Routes
//!
//! Axum router configuration for the storefront server.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Checkout:
///   - POST /api/paypal/create-order - Create a PayPal order
///
/// - Account header:
///   - GET  /partials/header - Header HTML fragment for the current session
///   - GET  /api/session - Header state as JSON
///   - POST /auth/sign-out - Sign out and return to the landing page
///
/// - Operations:
///   - GET /health - Health check
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let paypal_routes = Router::new().route("/create-order", post(handlers::create_order));

    let api_routes = Router::new()
        .nest("/paypal", paypal_routes)
        .route("/session", get(handlers::session_view));

    let auth_routes = Router::new().route("/sign-out", post(handlers::sign_out));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/partials/header", get(handlers::header_fragment))
        .nest("/api", api_routes)
        .nest("/auth", auth_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
