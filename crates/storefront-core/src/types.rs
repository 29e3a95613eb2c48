//! # Domain Types
//!
//! Core records shared by the storefront and the admin dashboard.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Storefront                          Admin dashboard                    │
//! │  ┌─────────────────┐                 ┌─────────────────┐               │
//! │  │  CatalogItem    │                 │     Order       │               │
//! │  │  price, rating  │                 │  status, total  │               │
//! │  │  original_price │                 └─────────────────┘               │
//! │  └────────┬────────┘                 ┌─────────────────┐               │
//! │           │ add to cart              │InventoryProduct │               │
//! │           ▼                          │  stock, status  │               │
//! │  ┌─────────────────┐                 └─────────────────┘               │
//! │  │    LineItem     │                 ┌─────────────────┐               │
//! │  │  unit_price     │                 │      User       │               │
//! │  │  quantity ≥ 1   │                 │  role, status   │               │
//! │  └─────────────────┘                 └─────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every record carries a string `id` that is unique within its collection
//! and is exposed through [`Identified`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (cart tax), 1000 bps = 10% (promo discount)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Identity
// =============================================================================

/// A record addressable by a collection-unique string id.
pub trait Identified {
    fn id(&self) -> &str;
}

// =============================================================================
// Line Item
// =============================================================================

/// A cart entry.
///
/// ## Invariants
/// - `quantity >= 1` while the item is in a cart; a quantity edit to zero
///   removes the line instead of keeping it at zero
/// - `unit_price` is non-negative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Catalog item id this line refers to.
    pub id: String,

    /// Display name at the time the item was added.
    pub name: String,

    /// Category label shown under the name.
    pub category: String,

    /// Unit price at the time the item was added.
    pub unit_price: Money,

    /// Quantity in cart.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            unit_price,
            quantity,
        }
    }

    /// Creates a line for `quantity` units of a catalog item.
    pub fn from_catalog(item: &CatalogItem, quantity: i64) -> Self {
        LineItem {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            unit_price: item.price,
            quantity,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> CoreResult<Money> {
        self.unit_price
            .checked_mul_quantity(self.quantity)
            .ok_or_else(|| CoreError::AmountOverflow {
                at: format!("line {}", self.id),
            })
    }
}

impl Identified for LineItem {
    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A product exposed for browsing and search.
///
/// Read-only within a session: searches derive views, they never edit the
/// catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,

    /// Average review score, 0.0 to 5.0.
    pub rating: f32,

    pub review_count: u32,

    /// Current selling price.
    pub price: Money,

    /// Price before the sale, when the item is discounted.
    pub original_price: Option<Money>,

    pub is_new: bool,
    pub is_on_sale: bool,

    /// Units available for the detail page quantity picker.
    #[serde(default)]
    pub stock_count: u32,
}

impl CatalogItem {
    /// Amount saved against the original price, if the item is discounted.
    ///
    /// ## Example
    /// ```text
    /// Mountain Bike Pro   $899.99   ~~$1,199.99~~   "Save $300.00"
    /// ```
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }

    /// Number of filled stars for the rating widget (⌊rating⌋, 0 to 5).
    pub fn full_stars(&self) -> u8 {
        self.rating.floor().clamp(0.0, 5.0) as u8
    }

    /// Clamps a quantity picker value to `[1, stock_count]`.
    ///
    /// An item with no recorded stock still allows a single unit.
    pub fn clamp_selection(&self, quantity: i64) -> i64 {
        let max = i64::from(self.stock_count.max(1));
        quantity.clamp(1, max)
    }

    /// URL slug of the category (`"Home & Garden"` → `"home-garden"`).
    pub fn category_slug(&self) -> String {
        crate::catalog::slugify(&self.category)
    }
}

impl Identified for CatalogItem {
    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Label shown in the status badge.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Orders still waiting on the store (pending or processing).
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

/// A customer order as listed on the admin orders page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Business id, e.g. `ORD-001`.
    pub id: String,
    pub customer: String,
    pub email: String,
    pub status: OrderStatus,
    pub total: Money,
    /// Number of units in the order.
    pub items: u32,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub payment_method: String,
}

impl Identified for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Inventory Products
// =============================================================================

/// Listing status recorded on an inventory product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    LowStock,
    OutOfStock,
}

/// Badge shown next to an inventory product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockBadge {
    Active,
    LowStock,
    OutOfStock,
}

impl StockBadge {
    pub fn label(&self) -> &'static str {
        match self {
            StockBadge::Active => "Active",
            StockBadge::LowStock => "Low Stock",
            StockBadge::OutOfStock => "Out of Stock",
        }
    }
}

/// Stock level at or below which a product counts as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A product as managed on the admin products page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryProduct {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Money,
    pub stock: u32,
    pub status: ProductStatus,
}

impl InventoryProduct {
    /// Badge for the product row.
    ///
    /// The recorded status and the live stock count are both consulted;
    /// whichever is worse wins.
    pub fn stock_badge(&self) -> StockBadge {
        if self.status == ProductStatus::OutOfStock || self.stock == 0 {
            StockBadge::OutOfStock
        } else if self.status == ProductStatus::LowStock || self.stock <= LOW_STOCK_THRESHOLD {
            StockBadge::LowStock
        } else {
            StockBadge::Active
        }
    }
}

impl Identified for InventoryProduct {
    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Moderator,
    Customer,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Moderator => "Moderator",
            UserRole::Customer => "Customer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Suspended => "Suspended",
        }
    }
}

/// A registered account as listed on the admin users page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    #[ts(as = "String")]
    pub join_date: NaiveDate,
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
