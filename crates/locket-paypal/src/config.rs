//! # PayPal Configuration
//!
//! Configuration management for the PayPal integration.
//! All secrets are loaded from environment variables.
//!
//! Missing credentials do not prevent startup; they surface as a
//! `GatewayError::Configuration` on the first order attempt, before any
//! network traffic.

use locket_core::{GatewayError, GatewayResult};
use secrecy::SecretString;
use std::env;

pub const SANDBOX_API_BASE_URL: &str = "https://api-m.sandbox.paypal.com";
pub const LIVE_API_BASE_URL: &str = "https://api-m.paypal.com";

/// Which PayPal environment the gateway talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayPalMode {
    #[default]
    Sandbox,
    Live,
}

impl PayPalMode {
    /// `live` (any case) selects production, everything else the sandbox
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("live") {
            PayPalMode::Live
        } else {
            PayPalMode::Sandbox
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayPalMode::Sandbox => "sandbox",
            PayPalMode::Live => "live",
        }
    }

    pub fn api_base_url(&self) -> &'static str {
        match self {
            PayPalMode::Sandbox => SANDBOX_API_BASE_URL,
            PayPalMode::Live => LIVE_API_BASE_URL,
        }
    }
}

/// Client credentials borrowed from the config for one token exchange
#[derive(Debug)]
pub struct Credentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a SecretString,
}

/// PayPal REST API configuration
#[derive(Debug, Clone)]
pub struct PayPalConfig {
    /// REST app client id
    pub client_id: Option<String>,

    /// REST app secret
    client_secret: Option<SecretString>,

    /// Sandbox or live
    pub mode: PayPalMode,

    /// API base URL (derived from mode unless overridden for testing)
    pub api_base_url: String,

    /// Reuse access tokens until shortly before they expire
    pub token_cache: bool,
}

impl PayPalConfig {
    /// Load configuration from environment variables.
    ///
    /// Read env vars:
    /// - `PAYPAL_CLIENT_ID`
    /// - `PAYPAL_CLIENT_SECRET`
    /// - `PAYPAL_MODE` (`sandbox` | `live`, default `sandbox`)
    /// - `PAYPAL_API_BASE_URL` (optional override)
    /// - `PAYPAL_TOKEN_CACHE` (`true` | `1` to enable)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = non_empty("PAYPAL_MODE")
            .map(|m| PayPalMode::parse(&m))
            .unwrap_or_default();

        let api_base_url = non_empty("PAYPAL_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| mode.api_base_url().to_string());

        let token_cache = non_empty("PAYPAL_TOKEN_CACHE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            client_id: non_empty("PAYPAL_CLIENT_ID"),
            client_secret: non_empty("PAYPAL_CLIENT_SECRET").map(SecretString::from),
            mode,
            api_base_url,
            token_cache,
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        let mode = PayPalMode::Sandbox;
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(SecretString::from(client_secret.into())),
            mode,
            api_base_url: mode.api_base_url().to_string(),
            token_cache: false,
        }
    }

    /// Config with no credentials at all
    pub fn unconfigured() -> Self {
        Self::from_lookup(|_| None)
    }

    /// Borrow the client credentials, failing if either half is missing
    pub fn credentials(&self) -> GatewayResult<Credentials<'_>> {
        match (self.client_id.as_deref(), self.client_secret.as_ref()) {
            (Some(client_id), Some(client_secret)) => Ok(Credentials {
                client_id,
                client_secret,
            }),
            (None, Some(_)) => Err(GatewayError::Configuration(
                "PAYPAL_CLIENT_ID not set".to_string(),
            )),
            (Some(_), None) => Err(GatewayError::Configuration(
                "PAYPAL_CLIENT_SECRET not set".to_string(),
            )),
            (None, None) => Err(GatewayError::Configuration(
                "PayPal credentials not configured (set PAYPAL_CLIENT_ID and PAYPAL_CLIENT_SECRET)"
                    .to_string(),
            )),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials().is_ok()
    }

    pub fn is_live_mode(&self) -> bool {
        self.mode == PayPalMode::Live
    }

    pub fn token_url(&self) -> String {
        format!("{}/v1/oauth2/token", self.api_base_url)
    }

    pub fn orders_url(&self) -> String {
        format!("{}/v2/checkout/orders", self.api_base_url)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: select sandbox or live, resetting the base URL to match
    pub fn with_mode(mut self, mode: PayPalMode) -> Self {
        self.mode = mode;
        self.api_base_url = mode.api_base_url().to_string();
        self
    }

    /// Builder: enable or disable the access token cache
    pub fn with_token_cache(mut self, enabled: bool) -> Self {
        self.token_cache = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_mode_selects_endpoint() {
        let config = PayPalConfig::from_lookup(lookup(&[("PAYPAL_MODE", "live")]));
        assert!(config.is_live_mode());
        assert_eq!(config.api_base_url, LIVE_API_BASE_URL);

        let config = PayPalConfig::from_lookup(lookup(&[("PAYPAL_MODE", "sandbox")]));
        assert_eq!(config.api_base_url, SANDBOX_API_BASE_URL);

        let config = PayPalConfig::from_lookup(lookup(&[]));
        assert_eq!(config.mode, PayPalMode::Sandbox);
    }

    #[test]
    fn test_credentials_present() {
        let config = PayPalConfig::from_lookup(lookup(&[
            ("PAYPAL_CLIENT_ID", "client"),
            ("PAYPAL_CLIENT_SECRET", "secret"),
        ]));

        let creds = config.credentials().unwrap();
        assert_eq!(creds.client_id, "client");
        assert_eq!(creds.client_secret.expose_secret(), "secret");
    }

    #[test]
    fn test_missing_credentials() {
        let err = PayPalConfig::unconfigured().credentials().unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));

        let config = PayPalConfig::from_lookup(lookup(&[
            ("PAYPAL_CLIENT_ID", "client"),
            ("PAYPAL_CLIENT_SECRET", ""),
        ]));
        let err = config.credentials().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: PAYPAL_CLIENT_SECRET not set");
    }

    #[test]
    fn test_secret_redacted_in_debug() {
        let config = PayPalConfig::new("client", "hunter2");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }

    #[test]
    fn test_base_url_override() {
        let config = PayPalConfig::from_lookup(lookup(&[
            ("PAYPAL_API_BASE_URL", "http://127.0.0.1:9999/"),
            ("PAYPAL_TOKEN_CACHE", "true"),
        ]));

        assert_eq!(config.token_url(), "http://127.0.0.1:9999/v1/oauth2/token");
        assert_eq!(config.orders_url(), "http://127.0.0.1:9999/v2/checkout/orders");
        assert!(config.token_cache);
    }
}
