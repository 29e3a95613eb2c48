//! # Route Gate
//!
//! axum middleware that runs [`AccessPolicy::decide`] for every page
//! request.
//!
//! ```text
//!  GET /dashboard/orders            (no auth-token cookie)
//!      │
//!      ▼
//!  bypasses_gate? ── yes ──► handler
//!      │ no
//!      ▼
//!  decide(path, has_token, ?redirect)
//!      ├── Allow             ──► handler
//!      └── RedirectTo*       ──► 307 Location: /login?redirect=%2Fdashboard%2Forders
//! ```
//!
//! [`AccessPolicy::decide`]: storefront_core::AccessPolicy::decide

use axum::extract::{Query, Request, State};
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use storefront_core::access::REDIRECT_PARAM;
use storefront_core::AccessDecision;
use tracing::info;

use crate::SharedState;

/// Name of the cookie whose presence marks a signed-in visitor.
pub const AUTH_COOKIE: &str = "auth-token";

/// Asset and API paths the gate never looks at.
///
/// Skips `/_next/static`, `/_next/image`, `/favicon.ico`, `/images`, any
/// path containing a `.`, and `/api/` paths other than `/api/auth`.
pub fn bypasses_gate(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);

    if rest.starts_with("api/") && !rest.starts_with("api/auth") {
        return true;
    }

    ["_next/static", "_next/image", "favicon.ico", "images"]
        .iter()
        .any(|prefix| rest.starts_with(prefix))
        || rest.contains('.')
}

/// First `redirect` query value, if any.
///
/// Pairs are read in order so a repeated parameter resolves to its first
/// occurrence.
pub fn redirect_param(uri: &Uri) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == REDIRECT_PARAM)
        .map(|(_, value)| value)
}

/// True when the request carries a non-empty `auth-token` cookie.
pub fn has_auth_token(jar: &CookieJar) -> bool {
    jar.get(AUTH_COOKIE)
        .map(|cookie| !cookie.value().is_empty())
        .unwrap_or(false)
}

/// The route access middleware.
///
/// Redirects use `307 Temporary Redirect` so the method is preserved.
pub async fn route_gate(
    State(state): State<SharedState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if bypasses_gate(&path) {
        return next.run(request).await;
    }

    let redirect = redirect_param(request.uri());

    let decision = state
        .access
        .decide(&path, has_auth_token(&jar), redirect.as_deref());

    match decision.location() {
        Some(location) => {
            let reason = match decision {
                AccessDecision::RedirectToLogin { .. } => "login required",
                _ => "already signed in",
            };
            info!(%path, %location, reason, "route gate redirect");
            Redirect::temporary(&location).into_response()
        }
        None => next.run(request).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Cookie;

    #[test]
    fn test_bypasses_gate() {
        for path in [
            "/_next/static/chunk.js",
            "/_next/image",
            "/favicon.ico",
            "/images/hero.png",
            "/robots.txt",
            "/api/cart/summary",
            "/api/products",
        ] {
            assert!(bypasses_gate(path), "{}", path);
        }

        for path in ["/", "/dashboard", "/login", "/api/auth/session", "/products/1"] {
            assert!(!bypasses_gate(path), "{}", path);
        }
    }

    #[test]
    fn test_redirect_param() {
        let uri = |s: &str| s.parse::<Uri>().unwrap();

        assert_eq!(
            redirect_param(&uri("/login?redirect=%2Fdashboard%2Forders")).as_deref(),
            Some("/dashboard/orders")
        );
        assert_eq!(
            redirect_param(&uri(
                "/login?redirect=%2Fdashboard%2Forders&redirect=%2Fdashboard%2Fusers"
            ))
            .as_deref(),
            Some("/dashboard/orders")
        );
        assert_eq!(
            redirect_param(&uri("/login?from=x&redirect=%2Fdashboard")).as_deref(),
            Some("/dashboard")
        );
        assert_eq!(redirect_param(&uri("/login")), None);
        assert_eq!(redirect_param(&uri("/login?other=1")), None);
    }

    #[test]
    fn test_has_auth_token() {
        let jar = CookieJar::new();
        assert!(!has_auth_token(&jar));

        let jar = CookieJar::new().add(Cookie::new(AUTH_COOKIE, ""));
        assert!(!has_auth_token(&jar));

        let jar = CookieJar::new().add(Cookie::new(AUTH_COOKIE, "abc123"));
        assert!(has_auth_token(&jar));
    }
}
