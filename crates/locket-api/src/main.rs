//! # Locket Photo Print server
//!
//! Checkout and account-header backend for the Locket Photo Print storefront.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAYPAL_CLIENT_ID=...
//! export PAYPAL_CLIENT_SECRET=...
//! export PAYPAL_MODE=sandbox   # or live
//! export IDENTITY_SERVICE_URL=https://identity.internal
//!
//! # Run the server
//! locket-print
//! ```

use locket_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Payment provider: {} ({})",
        state.gateway.provider_name(),
        state.gateway.environment()
    );
    info!("Identity provider: {}", state.identity.provider_name());

    let app = routes::create_router(state);

    info!(
        "Locket Photo Print v{} listening on http://{}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    if !is_prod {
        info!("Checkout: POST http://{}/api/paypal/create-order", addr);
        info!("Header:   GET  http://{}/partials/header", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
