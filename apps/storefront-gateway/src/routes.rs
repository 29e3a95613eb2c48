//! Router assembly.

use axum::routing::{delete, get, post};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::gate::route_gate;
use crate::handlers::{self, admin, cart, catalog};
use crate::SharedState;

/// Builds the full application router.
///
/// Every route except `/health` sits behind [`route_gate`], including the
/// fallback, so unlisted paths still get an access decision. The gate
/// itself skips asset and non-auth `/api/` paths.
pub fn create_router(state: SharedState) -> Router {
    let api_routes = Router::new()
        .route("/cart", get(cart::demo_cart))
        .route("/cart/summary", post(cart::cart_summary))
        .route("/cart/quantity", post(cart::cart_quantity))
        .route("/products", get(catalog::search_products));

    let dashboard_routes = Router::new()
        .route("/orders", get(admin::list_orders))
        .route("/products", get(admin::list_products))
        .route("/products/{id}", delete(admin::delete_product))
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route(
            "/users/{id}/toggle-suspension",
            post(admin::toggle_user_suspension),
        );

    let gated = Router::new()
        .route("/login", get(handlers::login_page))
        .route("/products/{id}", get(catalog::product_detail))
        .nest("/api", api_routes)
        .nest("/dashboard", dashboard_routes)
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), route_gate));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
