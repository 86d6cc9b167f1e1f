//! # locket-core
//!
//! Core types and traits for the Locket Photo Print server.
//!
//! This crate provides:
//! - `OrderGateway` trait for payment processor integrations
//! - `OrderRequest`, `Amount` and `OrderResult` for the checkout flow
//! - `Identity`, `IdentityProvider` and `HeaderView` for the account header
//! - `GatewayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use locket_core::{OrderGateway, OrderRequest};
//!
//! let request = OrderRequest::from_parts(Some("10.00"), Some("4x6 prints"), Some(false))?;
//! let order = gateway.create_order(&request).await?;
//!
//! // Hand order.id() to the PayPal buttons on the client
//! ```

pub mod error;
pub mod gateway;
pub mod identity;
pub mod order;

// Re-exports for convenience
pub use error::{
    GatewayError, GatewayResult, IdentityError, IdentityResult, MISSING_FIELDS_MESSAGE,
};
pub use gateway::{BoxedOrderGateway, OrderGateway};
pub use identity::{
    Avatar, BoxedIdentityProvider, HeaderView, Identity, IdentityProvider, MenuItem, MenuMethod,
    SessionToken, LANDING_ROUTE, PROFILE_ROUTE, SIGN_IN_ROUTE, SIGN_OUT_ROUTE, SIGN_UP_ROUTE,
};
pub use order::{Amount, Currency, OrderRequest, OrderResult, ShippingPreference};
