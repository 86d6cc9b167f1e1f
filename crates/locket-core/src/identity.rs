//! # Identity and Account Header
//!
//! Read-only view of the signed-in customer and the header state derived from it.
//! The identity itself is owned by an external provider; this module never
//! creates or mutates one.

use crate::error::IdentityResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Public landing page, target of a successful sign-out
pub const LANDING_ROUTE: &str = "/";
pub const SIGN_IN_ROUTE: &str = "/sign-in";
pub const SIGN_UP_ROUTE: &str = "/sign-up";
pub const PROFILE_ROUTE: &str = "/profile";
pub const SIGN_OUT_ROUTE: &str = "/auth/sign-out";

/// The authenticated customer as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, rename = "photoURL", alias = "photoUrl", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
            photo_url: None,
        }
    }

    /// Builder: set display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Builder: set photo URL
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// Name shown next to the avatar: display name when set, else the email
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Opaque session credential presented by the browser
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// Seam to the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the identity behind a session, `None` when signed out.
    async fn current_identity(&self, session: &SessionToken) -> IdentityResult<Option<Identity>>;

    /// Terminate the session with the provider.
    async fn sign_out(&self, session: &SessionToken) -> IdentityResult<()>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared identity provider
pub type BoxedIdentityProvider = Arc<dyn IdentityProvider>;

/// Account avatar: the profile photo, or the uppercased first letter of the email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Avatar {
    Image { url: String, alt: String },
    Initial { letter: char },
}

impl Avatar {
    pub fn for_identity(identity: &Identity) -> Self {
        match identity.photo_url.as_deref().filter(|u| !u.trim().is_empty()) {
            Some(url) => Avatar::Image {
                url: url.to_string(),
                alt: identity.label().to_string(),
            },
            None => Avatar::Initial {
                letter: initial_of(&identity.email),
            },
        }
    }
}

fn initial_of(email: &str) -> char {
    // Some characters uppercase to several chars ('ß' -> "SS"); keep the first.
    email
        .chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

/// HTTP method a menu entry is activated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MenuMethod {
    Get,
    Post,
}

/// One entry of the account menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub href: &'static str,
    pub method: MenuMethod,
}

/// What the site header shows for the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HeaderView {
    SignedOut {
        sign_in_href: &'static str,
        sign_up_href: &'static str,
    },
    SignedIn {
        avatar: Avatar,
        label: String,
        menu: Vec<MenuItem>,
    },
}

impl HeaderView {
    pub fn for_identity(identity: Option<&Identity>) -> Self {
        match identity {
            None => HeaderView::SignedOut {
                sign_in_href: SIGN_IN_ROUTE,
                sign_up_href: SIGN_UP_ROUTE,
            },
            Some(identity) => HeaderView::SignedIn {
                avatar: Avatar::for_identity(identity),
                label: identity.label().to_string(),
                menu: vec![
                    MenuItem {
                        label: "Profile",
                        href: PROFILE_ROUTE,
                        method: MenuMethod::Get,
                    },
                    MenuItem {
                        label: "Sign out",
                        href: SIGN_OUT_ROUTE,
                        method: MenuMethod::Post,
                    },
                ],
            },
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, HeaderView::SignedIn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_fallback() {
        let identity = Identity::new("a@b.com");
        assert_eq!(Avatar::for_identity(&identity), Avatar::Initial { letter: 'A' });
    }

    #[test]
    fn test_photo_avatar() {
        let identity = Identity::new("jo@example.com")
            .with_display_name("Jo")
            .with_photo_url("https://cdn.example.com/jo.png");

        assert_eq!(
            Avatar::for_identity(&identity),
            Avatar::Image {
                url: "https://cdn.example.com/jo.png".to_string(),
                alt: "Jo".to_string(),
            }
        );
    }

    #[test]
    fn test_blank_photo_uses_initial() {
        let identity = Identity::new("zed@example.com").with_photo_url("  ");
        assert_eq!(Avatar::for_identity(&identity), Avatar::Initial { letter: 'Z' });
    }

    #[test]
    fn test_empty_email_initial() {
        assert_eq!(initial_of(""), '?');
        assert_eq!(initial_of("ß@example.com"), 'S');
    }

    #[test]
    fn test_signed_out_header() {
        let view = HeaderView::for_identity(None);
        assert!(!view.is_signed_in());
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"state": "signed_out", "sign_in_href": "/sign-in", "sign_up_href": "/sign-up"})
        );
    }

    #[test]
    fn test_signed_in_menu() {
        let identity = Identity::new("a@b.com");
        let HeaderView::SignedIn { label, menu, .. } = HeaderView::for_identity(Some(&identity)) else {
            panic!("expected signed-in header");
        };

        assert_eq!(label, "a@b.com");
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].href, PROFILE_ROUTE);
        assert_eq!(menu[1].href, SIGN_OUT_ROUTE);
        assert_eq!(menu[1].method, MenuMethod::Post);
    }

    #[test]
    fn test_identity_wire_format() {
        let identity: Identity = serde_json::from_value(json!({
            "email": "a@b.com",
            "displayName": "Ann",
            "photoURL": "https://cdn.example.com/a.png"
        }))
        .unwrap();

        assert_eq!(identity.label(), "Ann");
        assert_eq!(identity.photo_url.as_deref(), Some("https://cdn.example.com/a.png"));
    }
}
