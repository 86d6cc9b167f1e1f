//! # PayPal Access Tokens
//!
//! OAuth2 client-credentials exchange against `/v1/oauth2/token`.
//!
//! By default every call performs a fresh exchange. With `token_cache`
//! enabled the last token is reused until [`EXPIRY_SKEW_SECS`] before the
//! expiry PayPal declared, and only for the same client id.

use crate::config::{Credentials, PayPalConfig};
use chrono::{DateTime, Duration, Utc};
use locket_core::{GatewayError, GatewayResult};
use reqwest::{header::ACCEPT, Client};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

/// Cached tokens are treated as expired this long before PayPal says so
pub const EXPIRY_SKEW_SECS: i64 = 60;

const GRANT_TYPE: &str = "client_credentials";

/// A bearer token issued by PayPal
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: SecretString,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value: SecretString::from(value.into()),
            expires_at,
        }
    }

    pub fn secret(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// True while the token can still be reused at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .map(|exp| exp - Duration::seconds(EXPIRY_SKEW_SECS) > now)
            .unwrap_or(false)
    }
}

struct CachedToken {
    client_id: String,
    token: AccessToken,
}

/// Obtains access tokens for the configured REST app
pub struct TokenSource {
    client: Client,
    cache: Option<Mutex<Option<CachedToken>>>,
}

impl TokenSource {
    pub fn new(client: Client, cache_enabled: bool) -> Self {
        Self {
            client,
            cache: cache_enabled.then(|| Mutex::new(None)),
        }
    }

    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// Get a bearer token for `config`'s credentials.
    ///
    /// Fails with `Configuration` before any network call when credentials
    /// are missing.
    #[instrument(skip_all, fields(mode = config.mode.as_str()))]
    pub async fn access_token(&self, config: &PayPalConfig) -> GatewayResult<AccessToken> {
        let credentials = config.credentials()?;

        let Some(cache) = &self.cache else {
            return self.exchange(config, &credentials).await;
        };

        // Held across the exchange so concurrent callers share one refresh.
        let mut slot = cache.lock().await;
        if let Some(cached) = slot.as_ref() {
            if cached.client_id == credentials.client_id && cached.token.is_fresh(Utc::now()) {
                debug!("Reusing cached PayPal access token");
                return Ok(cached.token.clone());
            }
        }

        let token = self.exchange(config, &credentials).await?;
        *slot = Some(CachedToken {
            client_id: credentials.client_id.to_string(),
            token: token.clone(),
        });
        Ok(token)
    }

    async fn exchange(
        &self,
        config: &PayPalConfig,
        credentials: &Credentials<'_>,
    ) -> GatewayResult<AccessToken> {
        let response = self
            .client
            .post(config.token_url())
            .basic_auth(
                credentials.client_id,
                Some(credentials.client_secret.expose_secret()),
            )
            .header(ACCEPT, "application/json")
            .form(&[("grant_type", GRANT_TYPE)])
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("PayPal token exchange failed: status={}, body={}", status, body);
            return Err(token_error(status.as_u16(), &body));
        }

        let token_response: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            GatewayError::Serialization(format!("Failed to parse PayPal token response: {}", e))
        })?;

        if token_response.access_token.is_empty() {
            return Err(GatewayError::UpstreamAuth(
                "PayPal token response did not contain an access token".to_string(),
            ));
        }

        debug!(
            "Obtained PayPal access token: type={}, expires_in={:?}",
            token_response.token_type.as_deref().unwrap_or("Bearer"),
            token_response.expires_in
        );

        // An expiry chrono cannot represent leaves the token uncacheable.
        let expires_at = token_response
            .expires_in
            .and_then(Duration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));

        Ok(AccessToken::new(token_response.access_token, expires_at))
    }
}

/// Translate a failed token response into a caller-safe message.
///
/// Only the OAuth error code is surfaced; descriptions and payloads stay in the logs.
fn token_error(status: u16, body: &str) -> GatewayError {
    match serde_json::from_str::<OAuthErrorResponse>(body) {
        Ok(err) if err.error == "invalid_client" => GatewayError::UpstreamAuth(
            "PayPal rejected the client credentials (invalid_client); \
             check PAYPAL_CLIENT_ID and PAYPAL_CLIENT_SECRET"
                .to_string(),
        ),
        Ok(err) => GatewayError::UpstreamAuth(format!(
            "token request returned HTTP {} ({})",
            status, err.error
        )),
        Err(_) => GatewayError::UpstreamAuth(format!("token request returned HTTP {}", status)),
    }
}

// =============================================================================
// PayPal OAuth Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // base64("test-client:test-secret")
    const BASIC_AUTH: &str = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";

    fn config_for(server: &MockServer) -> PayPalConfig {
        PayPalConfig::new("test-client", "test-secret").with_api_base_url(server.uri())
    }

    #[test]
    fn test_token_freshness() {
        let now = Utc::now();
        assert!(AccessToken::new("t", Some(now + Duration::hours(1))).is_fresh(now));
        assert!(!AccessToken::new("t", Some(now + Duration::seconds(30))).is_fresh(now));
        assert!(!AccessToken::new("t", None).is_fresh(now));
    }

    #[test]
    fn test_invalid_client_message() {
        let err = token_error(
            401,
            r#"{"error":"invalid_client","error_description":"Client Authentication failed"}"#,
        );
        let message = err.to_string();
        assert!(message.contains("invalid_client"));
        assert!(!message.contains("Client Authentication failed"));
    }

    #[test]
    fn test_unparseable_error_hides_body() {
        let err = token_error(503, "<html>upstream exploded</html>");
        assert_eq!(
            err.to_string(),
            "Payment processor authentication failed: token request returned HTTP 503"
        );
    }

    #[tokio::test]
    async fn test_exchange_uses_basic_auth_and_grant_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .and(header("authorization", BASIC_AUTH))
            .and(body_string("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "A21AAtoken",
                "token_type": "Bearer",
                "expires_in": 32400
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = TokenSource::new(Client::new(), false);
        let token = source.access_token(&config_for(&server)).await.unwrap();

        assert_eq!(token.secret(), "A21AAtoken");
        assert!(token.is_fresh(Utc::now()));
    }

    #[tokio::test]
    async fn test_out_of_range_expiry_is_never_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "long-lived",
                "expires_in": i64::MAX
            })))
            .expect(2)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let source = TokenSource::new(Client::new(), true);

        let first = source.access_token(&config).await.unwrap();
        assert_eq!(first.secret(), "long-lived");
        assert!(first.expires_at().is_none());
        assert!(!first.is_fresh(Utc::now()));

        source.access_token(&config).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = PayPalConfig::unconfigured().with_api_base_url(server.uri());
        let err = TokenSource::new(Client::new(), false)
            .access_token(&config)
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_cache_reuses_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "cached-token",
                "expires_in": 32400
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let source = TokenSource::new(Client::new(), true);

        let first = source.access_token(&config).await.unwrap();
        let second = source.access_token(&config).await.unwrap();
        assert_eq!(first.secret(), second.secret());
    }

    #[tokio::test]
    async fn test_no_cache_fetches_every_time() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh-token",
                "expires_in": 32400
            })))
            .expect(2)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let source = TokenSource::new(Client::new(), false);

        source.access_token(&config).await.unwrap();
        source.access_token(&config).await.unwrap();
    }
}
