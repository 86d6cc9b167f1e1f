//! # Identity Providers
//!
//! Adapters for the external identity service that owns customer sessions.
//! The server never issues sessions itself; it only forwards the browser's
//! session token and renders what the provider reports.

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum_extra::extract::CookieJar;
use locket_core::{Identity, IdentityError, IdentityProvider, IdentityResult, SessionToken};
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// Cookie carrying the identity service's session token
pub const SESSION_COOKIE: &str = "locket_session";

/// Read the session token from `Authorization: Bearer` or the session cookie
pub fn session_token(headers: &HeaderMap, jar: &CookieJar) -> Option<SessionToken> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(SessionToken::new(token));
    }

    jar.get(SESSION_COOKIE)
        .map(|c| c.value().trim())
        .filter(|v| !v.is_empty())
        .map(SessionToken::new)
}

/// Identity provider backed by an HTTP identity service.
///
/// - `GET {base}/session` answers the identity JSON, or 401/404 when signed out
/// - `POST {base}/session/revoke` terminates the session
pub struct RemoteIdentityProvider {
    base_url: String,
    client: Client,
}

impl RemoteIdentityProvider {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("locket-print/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn session_url(&self) -> String {
        format!("{}/session", self.base_url)
    }

    fn revoke_url(&self) -> String {
        format!("{}/session/revoke", self.base_url)
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentityProvider {
    #[instrument(skip_all)]
    async fn current_identity(&self, session: &SessionToken) -> IdentityResult<Option<Identity>> {
        let response = self
            .client
            .get(self.session_url())
            .bearer_auth(session.expose())
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND {
            debug!("Identity service reports no active session");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(IdentityError::Unavailable(format!(
                "session lookup returned HTTP {}",
                status
            )));
        }

        let identity = response
            .json::<Identity>()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("invalid identity payload: {}", e)))?;

        Ok(Some(identity))
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, session: &SessionToken) -> IdentityResult<()> {
        let response = self
            .client
            .post(self.revoke_url())
            .bearer_auth(session.expose())
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Session revoke failed: status={}, body={}", status, body);

        if status.is_client_error() {
            Err(IdentityError::Rejected(format!("HTTP {}", status)))
        } else {
            Err(IdentityError::Unavailable(format!("HTTP {}", status)))
        }
    }

    fn provider_name(&self) -> &'static str {
        "remote"
    }
}

/// Provider used when no identity service is configured: nobody is signed in.
pub struct AnonymousIdentityProvider;

#[async_trait]
impl IdentityProvider for AnonymousIdentityProvider {
    async fn current_identity(&self, _session: &SessionToken) -> IdentityResult<Option<Identity>> {
        Ok(None)
    }

    async fn sign_out(&self, _session: &SessionToken) -> IdentityResult<()> {
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "anonymous"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum_extra::extract::cookie::Cookie;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_session_token_sources() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "from-cookie"));
        let mut headers = HeaderMap::new();

        assert_eq!(session_token(&headers, &jar).unwrap().expose(), "from-cookie");

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(session_token(&headers, &jar).unwrap().expose(), "from-header");

        assert!(session_token(&HeaderMap::new(), &CookieJar::new()).is_none());
    }

    #[tokio::test]
    async fn test_remote_identity_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/session"))
            .and(header("authorization", "Bearer sess-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "a@b.com",
                "displayName": "Ann"
            })))
            .mount(&server)
            .await;

        let provider = RemoteIdentityProvider::new(server.uri()).unwrap();
        let identity = provider
            .current_identity(&SessionToken::new("sess-1"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.display_name.as_deref(), Some("Ann"));
    }

    #[tokio::test]
    async fn test_remote_signed_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let provider = RemoteIdentityProvider::new(server.uri()).unwrap();
        let identity = provider.current_identity(&SessionToken::new("stale")).await.unwrap();
        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn test_remote_sign_out_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session/revoke"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = RemoteIdentityProvider::new(server.uri()).unwrap();
        let err = provider.sign_out(&SessionToken::new("sess-1")).await.unwrap_err();
        assert!(matches!(err, IdentityError::Unavailable(_)));
    }
}
