//! # Views
//!
//! Server-rendered HTML fragments. Templates live in `templates/` and are
//! compiled by askama, which HTML-escapes every interpolated value.

use askama::Template;
use locket_core::{Avatar, HeaderView, MenuMethod, SIGN_IN_ROUTE, SIGN_UP_ROUTE};

/// Account header fragment (`templates/header.html`)
#[derive(Template)]
#[template(path = "header.html")]
pub struct HeaderTemplate {
    pub signed_in: bool,
    pub sign_in_href: &'static str,
    pub sign_up_href: &'static str,
    pub account: Option<AccountMenu>,
}

/// Signed-in part of the header
pub struct AccountMenu {
    pub label: String,
    pub avatar_url: Option<String>,
    pub avatar_alt: String,
    pub initial: String,
    pub menu: Vec<MenuEntry>,
}

pub struct MenuEntry {
    pub label: &'static str,
    pub href: &'static str,
    pub is_post: bool,
}

impl From<&HeaderView> for HeaderTemplate {
    fn from(view: &HeaderView) -> Self {
        match view {
            HeaderView::SignedOut {
                sign_in_href,
                sign_up_href,
            } => Self {
                signed_in: false,
                sign_in_href: *sign_in_href,
                sign_up_href: *sign_up_href,
                account: None,
            },
            HeaderView::SignedIn {
                avatar,
                label,
                menu,
            } => {
                let (avatar_url, avatar_alt, initial) = match avatar {
                    Avatar::Image { url, alt } => (Some(url.clone()), alt.clone(), String::new()),
                    Avatar::Initial { letter } => (None, label.clone(), letter.to_string()),
                };

                Self {
                    signed_in: true,
                    sign_in_href: SIGN_IN_ROUTE,
                    sign_up_href: SIGN_UP_ROUTE,
                    account: Some(AccountMenu {
                        label: label.clone(),
                        avatar_url,
                        avatar_alt,
                        initial,
                        menu: menu
                            .iter()
                            .map(|item| MenuEntry {
                                label: item.label,
                                href: item.href,
                                is_post: item.method == MenuMethod::Post,
                            })
                            .collect(),
                    }),
                }
            }
        }
    }
}

/// Render the account header for a view
pub fn render_header(view: &HeaderView) -> askama::Result<String> {
    HeaderTemplate::from(view).render()
}
