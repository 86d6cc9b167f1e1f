//! # Order Gateway Trait
//!
//! Strategy trait for payment processors that can create a print order.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │        OrderGateway (trait)          │
//! │  ├── create_order()                  │
//! │  └── provider_name()                 │
//! └──────────────────────────────────────┘
//!                    ▲
//!          ┌─────────┴─────────┐
//!  ┌───────┴────────┐  ┌───────┴────────┐
//!  │PayPalOrder     │  │ test doubles   │
//!  │   Gateway      │  │                │
//!  └────────────────┘  └────────────────┘
//! ```

use crate::error::GatewayResult;
use crate::order::{OrderRequest, OrderResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment processor integrations.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Create an order with the processor and return its representation unchanged.
    ///
    /// Implementations authenticate as part of every call unless they
    /// were explicitly configured to reuse credentials.
    async fn create_order(&self, request: &OrderRequest) -> GatewayResult<OrderResult>;

    /// Get the provider name (for logging and routing).
    fn provider_name(&self) -> &'static str;

    /// Environment label of the upstream endpoint (e.g. `sandbox`, `live`).
    fn environment(&self) -> &'static str {
        "unknown"
    }
}

/// Type alias for a shared order gateway (dynamic dispatch)
pub type BoxedOrderGateway = Arc<dyn OrderGateway>;
