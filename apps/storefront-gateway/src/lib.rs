//! # Storefront Gateway
//!
//! HTTP front door for the storefront: a route access gate in front of a
//! small JSON API over the storefront-core logic.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Gateway Request Path                            │
//! │                                                                         │
//! │  request ──► TraceLayer ──► route_gate ──┬──► 307 Location: /login?... │
//! │                              (cookie      │                             │
//! │                               auth-token) └──► handler                  │
//! │                                                 │                       │
//! │  ┌──────────────┐  ┌──────────────┐  ┌─────────▼────────┐              │
//! │  │ cart         │  │ catalog      │  │ admin            │              │
//! │  │ • summary    │  │ • search     │  │ • orders         │              │
//! │  │ • quantity   │  │ • detail     │  │ • products       │              │
//! │  └──────┬───────┘  └──────┬───────┘  │ • users          │              │
//! │         │                 │          └─────────┬────────┘              │
//! │         └─────────────────┴────────────────────┘                       │
//! │                           │                                             │
//! │                 Arc<AppState> (read-only)                               │
//! │           policies + fixture collections                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`] for the `STOREFRONT_*` environment variables.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod gate;
pub mod handlers;
pub mod routes;

use std::sync::Arc;

use storefront_core::{
    AccessPolicy, CatalogItem, InventoryProduct, Order, PricingPolicy, User,
};

// Re-exports
pub use config::{ConfigError, GatewayConfig};
pub use error::{GatewayError, GatewayResult};
pub use routes::create_router;

/// Shared application state.
///
/// Built once at startup and never mutated, so handlers read it without
/// locking.
#[derive(Debug)]
pub struct AppState {
    pub config: GatewayConfig,
    pub access: AccessPolicy,
    pub pricing: PricingPolicy,
    pub catalog: Vec<CatalogItem>,
    pub orders: Vec<Order>,
    pub inventory: Vec<InventoryProduct>,
    pub users: Vec<User>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// State for `config` backed by the fixture data.
    pub fn new(config: GatewayConfig) -> Self {
        AppState {
            access: AccessPolicy::new(config.unknown_paths),
            pricing: config.pricing.clone(),
            catalog: fixtures::catalog(),
            orders: fixtures::orders(),
            inventory: fixtures::inventory(),
            users: fixtures::users(),
            config,
        }
    }

    pub fn shared(config: GatewayConfig) -> SharedState {
        Arc::new(AppState::new(config))
    }
}
