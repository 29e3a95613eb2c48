//! # storefront-core: Pure Logic for the Storefront
//!
//! Everything the storefront and its admin dashboard compute, as pure
//! functions over explicit collections. No I/O, no shared state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser / Frontend                           │   │
//! │  │    Catalog ──► Product ──► Cart ──► Login ──► Dashboard        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP + auth-token cookie               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-gateway (axum)                       │   │
//! │  │    route_gate middleware, JSON handlers, fixtures               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │ pricing  │ │ catalog  │ │  table   │ │  access  │          │   │
//! │  │   │ summary  │ │  search  │ │ filter / │ │  route   │          │   │
//! │  │   │ qty edit │ │  slugs   │ │ sort/page│ │ decision │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │dashboard │ │  types   │ │  money   │ │validation│          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in integer cents
//! - [`types`] - Line items, catalog items, orders, products, users
//! - [`pricing`] - Cart summary and quantity edits
//! - [`catalog`] - Catalog search and slugs
//! - [`table`] - Filter/sort/paginate adapter for admin tables
//! - [`access`] - Public/protected route decisions
//! - [`dashboard`] - Admin counters, row edits and column sets
//! - [`error`] - Error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Derived, never stored**: summaries, filtered lists and table pages
//!    are recomputed from the source collection on every call
//! 2. **New collections**: edits return a new `Vec`, the input is untouched
//! 3. **Integer Money**: all amounts are cents (i64)
//! 4. **Explicit Errors**: unknown ids and negative quantities are errors,
//!    never silent no-ops
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{compute_cart_summary, LineItem, Money};
//!
//! let cart = vec![
//!     LineItem::new("1", "Mountain Bike Pro", "Bikes", Money::from_cents(89999), 1),
//!     LineItem::new("3", "Smart Phone X1", "Electronics", Money::from_cents(79999), 2),
//! ];
//!
//! let summary = compute_cart_summary(&cart, "SAVE10").unwrap();
//! assert_eq!(summary.subtotal, Money::from_cents(249997));
//! assert!(summary.shipping.is_zero());
//! assert_eq!(summary.tax, Money::from_cents(20000));
//! assert_eq!(summary.discount, Money::from_cents(25000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod money;
pub mod pricing;
pub mod table;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use access::{AccessDecision, AccessPolicy, RouteClass, UnknownPathPolicy};
pub use catalog::{filter_catalog, filter_catalog_in, SearchScope};
pub use error::{CoreError, TableError, ValidationError};
pub use money::Money;
pub use pricing::{
    compute_cart_summary, update_quantity, PricingPolicy, PricingSummary, QuantityChange,
    QuantityUpdate,
};
pub use table::{CellValue, Column, SortDirection, TablePage, TableView};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Catches typos like 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;
