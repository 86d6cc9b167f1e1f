//! # locket-paypal
//!
//! PayPal order gateway for the Locket Photo Print server.
//!
//! `PayPalOrderGateway` implements `locket_core::OrderGateway` on top of the
//! PayPal REST API:
//!
//! 1. `POST /v1/oauth2/token` exchanges the REST app's client id and secret
//!    (HTTP Basic) for a bearer token
//! 2. `POST /v2/checkout/orders` creates a `CAPTURE` order for the amount
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use locket_core::{OrderGateway, OrderRequest};
//! use locket_paypal::PayPalOrderGateway;
//!
//! // Reads PAYPAL_CLIENT_ID, PAYPAL_CLIENT_SECRET, PAYPAL_MODE
//! let gateway = PayPalOrderGateway::from_env()?;
//!
//! let request = OrderRequest::from_parts(Some("10.00"), Some("4x6 prints"), Some(false))?;
//! let order = gateway.create_order(&request).await?;
//! ```

pub mod config;
pub mod orders;
pub mod token;

// Re-exports
pub use config::{PayPalConfig, PayPalMode, LIVE_API_BASE_URL, SANDBOX_API_BASE_URL};
pub use orders::PayPalOrderGateway;
pub use token::{AccessToken, TokenSource};
