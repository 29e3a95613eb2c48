//! # Route Access
//!
//! Decides, per request path, whether to let the request through or
//! redirect it.
//!
//! ## Decision Procedure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  AccessPolicy::decide(path, token, redirect)            │
//! │                                                                         │
//! │  classify(path)                                                         │
//! │   ├── Public     exact: /  /login  /register  /about  /contact         │
//! │   │              prefix: /products /categories /cart /demo /api/auth   │
//! │   ├── Protected  prefix: /dashboard /admin                             │
//! │   └── Unknown    everything else                                       │
//! │                                                                         │
//! │  Protected, no token      → RedirectToLogin  /login?redirect=<path>    │
//! │  /login, token            → RedirectToTarget <redirect> or /dashboard  │
//! │  Unknown, no token        → UnknownPathPolicy (Allow | RequireAuth)    │
//! │  anything else            → Allow                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the *presence* of a token is checked here. Verifying it is someone
//! else's job.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where unauthenticated visitors of protected paths are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where signed-in visitors of the login page go by default.
pub const DEFAULT_TARGET: &str = "/dashboard";

/// Query parameter carrying the post-login destination.
pub const REDIRECT_PARAM: &str = "redirect";

const PUBLIC_PATHS: &[&str] = &["/", "/login", "/register", "/about", "/contact"];
const PUBLIC_PREFIXES: &[&str] = &["/products", "/categories", "/cart", "/demo", "/api/auth"];
const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/admin"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    Public,
    Protected,
    /// Matches neither list.
    Unknown,
}

/// How to treat paths that are neither public nor protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPathPolicy {
    /// Let them through.
    #[default]
    Allow,
    /// Treat them like protected paths.
    RequireAuth,
}

/// Outcome of [`AccessPolicy::decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Send the visitor to the login page, remembering where they wanted to go.
    RedirectToLogin { return_to: String },
    /// Send an already signed-in visitor on from the login page.
    RedirectToTarget { target: String },
}

impl AccessDecision {
    /// `Location` header value for redirects; `None` for [`AccessDecision::Allow`].
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::access::AccessDecision;
    ///
    /// let decision = AccessDecision::RedirectToLogin { return_to: "/dashboard/orders".into() };
    /// assert_eq!(
    ///     decision.location().as_deref(),
    ///     Some("/login?redirect=%2Fdashboard%2Forders")
    /// );
    /// ```
    pub fn location(&self) -> Option<String> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::RedirectToLogin { return_to } => Some(format!(
                "{}?{}={}",
                LOGIN_PATH,
                REDIRECT_PARAM,
                encode_uri_component(return_to)
            )),
            AccessDecision::RedirectToTarget { target } => Some(target.clone()),
        }
    }

    pub fn is_redirect(&self) -> bool {
        !matches!(self, AccessDecision::Allow)
    }
}

/// The immutable route lists plus the unknown-path rule.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    public_paths: Vec<String>,
    public_prefixes: Vec<String>,
    protected_prefixes: Vec<String>,
    unknown_paths: UnknownPathPolicy,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        AccessPolicy {
            public_paths: owned(PUBLIC_PATHS),
            public_prefixes: owned(PUBLIC_PREFIXES),
            protected_prefixes: owned(PROTECTED_PREFIXES),
            unknown_paths: UnknownPathPolicy::default(),
        }
    }
}

impl AccessPolicy {
    /// The storefront's route lists with a chosen unknown-path rule.
    pub fn new(unknown_paths: UnknownPathPolicy) -> Self {
        AccessPolicy {
            unknown_paths,
            ..AccessPolicy::default()
        }
    }

    pub fn unknown_paths(&self) -> UnknownPathPolicy {
        self.unknown_paths
    }

    /// Classifies `path`. Public lists are checked before protected ones.
    pub fn classify(&self, path: &str) -> RouteClass {
        let is_public = self.public_paths.iter().any(|p| p == path)
            || self.public_prefixes.iter().any(|p| path.starts_with(p.as_str()));
        if is_public {
            return RouteClass::Public;
        }

        if self.protected_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
            return RouteClass::Protected;
        }

        RouteClass::Unknown
    }

    /// Decides what to do with a request for `path`.
    ///
    /// `redirect` is the raw value of the `redirect` query parameter, if any.
    pub fn decide(&self, path: &str, has_token: bool, redirect: Option<&str>) -> AccessDecision {
        let class = self.classify(path);

        let needs_token = match class {
            RouteClass::Protected => true,
            RouteClass::Unknown => self.unknown_paths == UnknownPathPolicy::RequireAuth,
            RouteClass::Public => false,
        };

        if needs_token && !has_token {
            debug!(path, ?class, "no auth token, redirecting to login");
            return AccessDecision::RedirectToLogin {
                return_to: path.to_string(),
            };
        }

        if path == LOGIN_PATH && has_token {
            let target = match redirect {
                Some(target) if is_safe_redirect(target) => target.to_string(),
                Some(target) if !target.is_empty() => {
                    debug!(requested = target, "ignoring off-site redirect target");
                    DEFAULT_TARGET.to_string()
                }
                _ => DEFAULT_TARGET.to_string(),
            };
            debug!(destination = %target, "already signed in, leaving login page");
            return AccessDecision::RedirectToTarget { target };
        }

        AccessDecision::Allow
    }
}

/// A redirect target must stay on this site: one leading `/`, not `//`
/// (protocol-relative) and not `/\`.
fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\")
}

/// Percent-encodes `value` with the same unreserved set as JavaScript's
/// `encodeURIComponent` (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`).
pub fn encode_uri_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}

// =============================================================================
// Unit Tests
// =============================================================================
