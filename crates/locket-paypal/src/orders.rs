//! # PayPal Orders
//!
//! Implementation of the PayPal Orders v2 API (`POST /v2/checkout/orders`).
//! This is the checkout flow behind the print order buttons.

use crate::config::PayPalConfig;
use crate::token::TokenSource;
use async_trait::async_trait;
use locket_core::{
    GatewayError, GatewayResult, OrderGateway, OrderRequest, OrderResult, ShippingPreference,
};
use reqwest::{header::ACCEPT, Client};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Header PayPal uses to deduplicate create calls
const REQUEST_ID_HEADER: &str = "PayPal-Request-Id";

/// PayPal order gateway
///
/// Each `create_order` call exchanges credentials for a token and then
/// creates a capture-intent order, strictly in that order.
pub struct PayPalOrderGateway {
    config: PayPalConfig,
    client: Client,
    tokens: TokenSource,
}

impl PayPalOrderGateway {
    /// Create a new PayPal gateway
    pub fn new(config: PayPalConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("locket-print/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                GatewayError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let tokens = TokenSource::new(client.clone(), config.token_cache);
        Ok(Self {
            config,
            client,
            tokens,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> GatewayResult<Self> {
        Self::new(PayPalConfig::from_env())
    }

    pub fn config(&self) -> &PayPalConfig {
        &self.config
    }

    /// Build the Orders v2 request body
    fn build_order_body(request: &OrderRequest) -> PayPalOrderBody<'_> {
        PayPalOrderBody {
            intent: "CAPTURE",
            purchase_units: vec![PayPalPurchaseUnit {
                amount: PayPalAmount {
                    currency_code: request.amount.currency().code(),
                    value: request.amount.as_processor_value(),
                },
                description: &request.description,
            }],
            application_context: PayPalApplicationContext {
                shipping_preference: request.shipping_preference(),
            },
        }
    }
}

#[async_trait]
impl OrderGateway for PayPalOrderGateway {
    #[instrument(skip(self, request), fields(amount = %request.amount, requires_shipping = request.requires_shipping))]
    async fn create_order(&self, request: &OrderRequest) -> GatewayResult<OrderResult> {
        let token = self.tokens.access_token(&self.config).await?;

        let body = Self::build_order_body(request);
        let request_id = uuid::Uuid::new_v4().to_string();

        let response = self
            .client
            .post(self.config.orders_url())
            .bearer_auth(token.secret())
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, &request_id)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !status.is_success() {
            error!(
                "PayPal order creation failed: status={}, request_id={}, body={}",
                status, request_id, text
            );
            return Err(order_error(status.as_u16(), &text));
        }

        let order: OrderResult = serde_json::from_str(&text).map_err(|e| {
            GatewayError::Serialization(format!("Failed to parse PayPal order response: {}", e))
        })?;

        info!(
            "Created PayPal order: id={}, status={}",
            order.id().unwrap_or("unknown"),
            order.status().unwrap_or("unknown")
        );

        Ok(order)
    }

    fn provider_name(&self) -> &'static str {
        "paypal"
    }

    fn environment(&self) -> &'static str {
        self.config.mode.as_str()
    }
}

/// Translate a failed order response, preferring PayPal's structured error
fn order_error(status: u16, body: &str) -> GatewayError {
    let Ok(err) = serde_json::from_str::<PayPalErrorResponse>(body) else {
        return GatewayError::UpstreamOrder(format!("HTTP {}: {}", status, body));
    };

    let mut message = err
        .message
        .or(err.name)
        .unwrap_or_else(|| format!("HTTP {}", status));

    if let Some(detail) = err.details.first() {
        match &detail.description {
            Some(description) => message.push_str(&format!(" ({}: {})", detail.issue, description)),
            None => message.push_str(&format!(" ({})", detail.issue)),
        }
    }

    GatewayError::UpstreamOrder(message)
}

// =============================================================================
// PayPal API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct PayPalOrderBody<'a> {
    intent: &'static str,
    purchase_units: Vec<PayPalPurchaseUnit<'a>>,
    application_context: PayPalApplicationContext,
}

#[derive(Debug, Serialize)]
struct PayPalPurchaseUnit<'a> {
    amount: PayPalAmount,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct PayPalAmount {
    currency_code: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct PayPalApplicationContext {
    shipping_preference: ShippingPreference,
}

#[derive(Debug, Deserialize)]
struct PayPalErrorResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Vec<PayPalErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct PayPalErrorDetail {
    issue: String,
    #[serde(default)]
    description: Option<String>,
}
