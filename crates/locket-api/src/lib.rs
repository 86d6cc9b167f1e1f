//! # locket-api
//!
//! HTTP API layer for the Locket Photo Print server.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The PayPal checkout endpoint
//! - The server-rendered account header and sign-out
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/paypal/create-order` | Create PayPal order |
//! | GET | `/api/session` | Account header state (JSON) |
//! | GET | `/partials/header` | Account header (HTML) |
//! | POST | `/auth/sign-out` | Sign out |

pub mod handlers;
pub mod identity;
pub mod routes;
pub mod state;
pub mod views;

pub use identity::{AnonymousIdentityProvider, RemoteIdentityProvider, SESSION_COOKIE};
pub use routes::create_router;
pub use state::{AppConfig, AppState};
