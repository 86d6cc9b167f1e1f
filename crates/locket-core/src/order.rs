//! # Order Types
//!
//! Checkout request and processor result types for print orders.

use crate::error::{GatewayError, GatewayResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Longest purchase-unit description the processor accepts
pub const MAX_DESCRIPTION_LEN: usize = 127;

/// Currency for all print orders. The storefront sells in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    USD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
        }
    }

    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::USD => 2,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A positive order amount in major units (dollars), at most cent precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    value: Decimal,
    currency: Currency,
}

impl Amount {
    /// Parse a caller-supplied amount such as `"10.00"`
    pub fn parse(raw: &str, currency: Currency) -> GatewayResult<Self> {
        let value = Decimal::from_str(raw.trim()).map_err(|_| {
            GatewayError::Validation(format!(
                "Invalid amount: {:?} is not a decimal number",
                raw
            ))
        })?;

        if value <= Decimal::ZERO {
            return Err(GatewayError::Validation(
                "Invalid amount: must be greater than zero".to_string(),
            ));
        }

        if value.scale() > currency.decimal_places() {
            return Err(GatewayError::Validation(format!(
                "Invalid amount: at most {} decimal places are allowed for {}",
                currency.decimal_places(),
                currency
            )));
        }

        Ok(Self { value, currency })
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Decimal string in the form sent to the processor (e.g. `"10.00"`)
    pub fn as_processor_value(&self) -> String {
        self.value.to_string()
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// How the processor should collect a shipping address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingPreference {
    /// Use the address the buyer has on file with the processor
    GetFromFile,
    /// Digital goods or pickup, no address collected
    NoShipping,
}

impl ShippingPreference {
    pub fn from_requires_shipping(requires_shipping: bool) -> Self {
        if requires_shipping {
            ShippingPreference::GetFromFile
        } else {
            ShippingPreference::NoShipping
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingPreference::GetFromFile => "GET_FROM_FILE",
            ShippingPreference::NoShipping => "NO_SHIPPING",
        }
    }
}

/// A validated request to create a print order with the processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub amount: Amount,
    pub description: String,
    pub requires_shipping: bool,
}

impl OrderRequest {
    /// Validate raw checkout fields.
    ///
    /// Absent and blank values are both treated as missing.
    pub fn from_parts(
        amount: Option<&str>,
        description: Option<&str>,
        requires_shipping: Option<bool>,
    ) -> GatewayResult<Self> {
        let amount = amount.filter(|a| !a.trim().is_empty());
        let description = description.filter(|d| !d.trim().is_empty());

        let (Some(amount), Some(description)) = (amount, description) else {
            return Err(GatewayError::missing_fields());
        };

        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(GatewayError::Validation(format!(
                "Invalid description: at most {} characters are allowed",
                MAX_DESCRIPTION_LEN
            )));
        }

        Ok(Self {
            amount: Amount::parse(amount, Currency::USD)?,
            description: description.to_string(),
            requires_shipping: requires_shipping.unwrap_or(false),
        })
    }

    pub fn shipping_preference(&self) -> ShippingPreference {
        ShippingPreference::from_requires_shipping(self.requires_shipping)
    }
}

/// The processor's order representation, passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderResult(serde_json::Value);

impl OrderResult {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Processor order id, if the payload carries one
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(|v| v.as_str())
    }

    /// Processor order status (e.g. `CREATED`)
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(|v| v.as_str())
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}
