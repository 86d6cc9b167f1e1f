//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the order gateway, the identity provider and configuration.

use crate::identity::{AnonymousIdentityProvider, RemoteIdentityProvider};
use locket_core::{BoxedIdentityProvider, BoxedOrderGateway};
use locket_paypal::PayPalOrderGateway;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Base URL of the identity service, if any
    pub identity_service_url: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            identity_service_url: lookup("IDENTITY_SERVICE_URL").filter(|u| !u.trim().is_empty()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment order gateway
    pub gateway: BoxedOrderGateway,
    /// Source of the signed-in customer
    pub identity: BoxedIdentityProvider,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the PayPal gateway
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let paypal = PayPalOrderGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize PayPal: {}", e))?;

        if !paypal.config().has_credentials() {
            warn!("PayPal credentials are not configured; order creation will fail");
        }

        let identity = identity_provider(&config)?;

        Ok(Self::with_parts(config, Arc::new(paypal), identity))
    }

    /// Assemble state from already-built parts
    pub fn with_parts(
        config: AppConfig,
        gateway: BoxedOrderGateway,
        identity: BoxedIdentityProvider,
    ) -> Self {
        Self {
            gateway,
            identity,
            config,
        }
    }
}

fn identity_provider(config: &AppConfig) -> anyhow::Result<BoxedIdentityProvider> {
    match &config.identity_service_url {
        Some(url) => {
            info!("Identity service: {}", url);
            Ok(Arc::new(RemoteIdentityProvider::new(url.as_str())?))
        }
        None => {
            warn!("IDENTITY_SERVICE_URL not set, every visitor is shown as signed out");
            Ok(Arc::new(AnonymousIdentityProvider))
        }
    }
}
