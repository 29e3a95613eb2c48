//! # HTTP Handlers
//!
//! ## Handler Organization
//! ```text
//! handlers/
//! ├── mod.rs      ◄─── You are here (health, login page)
//! ├── cart.rs     ◄─── Cart summary and quantity edits
//! ├── catalog.rs  ◄─── Product search and detail
//! └── admin.rs    ◄─── Dashboard tables and user actions
//! ```
//!
//! ## How Handlers Work
//! Every handler takes the shared state plus its own extractors and returns
//! `GatewayResult<Json<T>>`. Extractor rejections are taken as `Result` so
//! that malformed input still produces the JSON error body.
//!
//! ```rust,ignore
//! pub async fn cart_summary(
//!     State(state): State<SharedState>,
//!     payload: Result<Json<SummaryRequest>, JsonRejection>,
//! ) -> GatewayResult<Json<SummaryResponse>> {
//!     let Json(request) = payload?;
//!     ...
//! }
//! ```

pub mod admin;
pub mod cart;
pub mod catalog;

use axum::http::Uri;
use axum::response::Html;

use crate::error::GatewayError;

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}

/// Fallback for paths without a route.
pub async fn not_found(uri: Uri) -> GatewayError {
    GatewayError::not_found("Page", uri.path())
}

/// Placeholder sign-in page.
///
/// Signed-in visitors never get here: the route gate sends them on to
/// their `redirect` target first.
pub async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html>\
         <html><head><title>Sign in</title></head>\
         <body><h1>Sign in</h1>\
         <form method=\"post\" action=\"/api/auth/login\">\
         <input name=\"email\" type=\"email\"><input name=\"password\" type=\"password\">\
         <button type=\"submit\">Sign in</button></form></body></html>",
    )
}
