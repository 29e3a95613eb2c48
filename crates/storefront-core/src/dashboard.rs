//! # Admin Dashboard
//!
//! Summary counters, row edits and table column sets for the three admin
//! pages (orders, products, users).
//!
//! ```text
//!  /dashboard/orders    order_stats      order_columns()
//!  /dashboard/products  inventory_stats  inventory_columns()
//!  /dashboard/users     user_stats       user_columns()   toggle_suspension
//! ```
//!
//! Like the cart, every edit returns a new collection.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::table::{CellValue, Column};
use crate::types::{
    Identified, InventoryProduct, Order, OrderStatus, ProductStatus, User, UserRole, UserStatus,
    LOW_STOCK_THRESHOLD,
};

// =============================================================================
// Row Edits
// =============================================================================

/// Returns `rows` without the row whose id is `id`.
///
/// Fails with [`CoreError::ItemNotFound`] if no row has that id.
pub fn remove_by_id<T: Identified + Clone>(rows: &[T], id: &str) -> CoreResult<Vec<T>> {
    if !rows.iter().any(|row| row.id() == id) {
        return Err(CoreError::ItemNotFound(id.to_string()));
    }

    debug!(id, "removing row");
    Ok(rows.iter().filter(|row| row.id() != id).cloned().collect())
}

/// Flips a user between suspended and active.
///
/// ## Behavior
/// ```text
/// Suspended  → Active
/// Active     → Suspended
/// Inactive   → Suspended
/// ```
pub fn toggle_suspension(users: &[User], id: &str) -> CoreResult<Vec<User>> {
    if !users.iter().any(|u| u.id == id) {
        return Err(CoreError::ItemNotFound(id.to_string()));
    }

    Ok(users
        .iter()
        .map(|user| {
            if user.id != id {
                return user.clone();
            }

            let status = match user.status {
                UserStatus::Suspended => UserStatus::Active,
                UserStatus::Active | UserStatus::Inactive => UserStatus::Suspended,
            };
            debug!(id, ?status, "toggled user suspension");
            User {
                status,
                ..user.clone()
            }
        })
        .collect())
}

// =============================================================================
// Counters
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderStats {
    pub total: usize,
    pub completed: usize,
    /// Pending or processing.
    pub pending: usize,
    /// Sum of completed order totals.
    pub revenue: Money,
}

pub fn order_stats(orders: &[Order]) -> OrderStats {
    let completed = || orders.iter().filter(|o| o.status == OrderStatus::Completed);

    OrderStats {
        total: orders.len(),
        completed: completed().count(),
        pending: orders.iter().filter(|o| o.status.is_open()).count(),
        revenue: completed().map(|o| o.total).sum(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryStats {
    pub total: usize,
    /// Recorded status is active.
    pub active: usize,
    /// In stock but at or below the low-stock threshold.
    pub low_stock: usize,
    pub out_of_stock: usize,
}

pub fn inventory_stats(products: &[InventoryProduct]) -> InventoryStats {
    InventoryStats {
        total: products.len(),
        active: products
            .iter()
            .filter(|p| p.status == ProductStatus::Active)
            .count(),
        low_stock: products
            .iter()
            .filter(|p| p.stock > 0 && p.stock <= LOW_STOCK_THRESHOLD)
            .count(),
        out_of_stock: products.iter().filter(|p| p.stock == 0).count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub admins: usize,
    pub suspended: usize,
}

pub fn user_stats(users: &[User]) -> UserStats {
    UserStats {
        total: users.len(),
        active: users.iter().filter(|u| u.status == UserStatus::Active).count(),
        admins: users.iter().filter(|u| u.role == UserRole::Admin).count(),
        suspended: users
            .iter()
            .filter(|u| u.status == UserStatus::Suspended)
            .count(),
    }
}

// =============================================================================
// Column Sets
// =============================================================================

/// Orders table. Search covers id, customer and email.
pub fn order_columns() -> Vec<Column<Order>> {
    vec![
        Column::new("id", "Order ID", |o: &Order| CellValue::from(o.id.as_str())).filterable(),
        Column::new("customer", "Customer", |o: &Order| CellValue::from(o.customer.as_str()))
            .filterable(),
        Column::new("email", "Email", |o: &Order| CellValue::from(o.email.as_str())).filterable(),
        Column::new("status", "Status", |o: &Order| CellValue::from(o.status.label())),
        Column::new("items", "Items", |o: &Order| CellValue::from(o.items)),
        Column::new("total", "Total", |o: &Order| CellValue::from(o.total)),
        Column::new("payment_method", "Payment", |o: &Order| {
            CellValue::from(o.payment_method.as_str())
        }),
        Column::new("date", "Date", |o: &Order| CellValue::from(o.date)),
    ]
}

/// Products table. Search covers name and category.
pub fn inventory_columns() -> Vec<Column<InventoryProduct>> {
    vec![
        Column::new("name", "Product", |p: &InventoryProduct| CellValue::from(p.name.as_str()))
            .filterable(),
        Column::new("category", "Category", |p: &InventoryProduct| {
            CellValue::from(p.category.as_str())
        })
        .filterable(),
        Column::new("price", "Price", |p: &InventoryProduct| CellValue::from(p.price)),
        Column::new("stock", "Stock", |p: &InventoryProduct| CellValue::from(p.stock)),
        Column::new("status", "Status", |p: &InventoryProduct| {
            CellValue::from(p.stock_badge().label())
        }),
    ]
}

/// Users table. Search covers name and email.
pub fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::new("name", "Name", |u: &User| CellValue::from(u.name.as_str())).filterable(),
        Column::new("email", "Email", |u: &User| CellValue::from(u.email.as_str())).filterable(),
        Column::new("role", "Role", |u: &User| CellValue::from(u.role.label())),
        Column::new("status", "Status", |u: &User| CellValue::from(u.status.label())),
        Column::new("join_date", "Joined", |u: &User| CellValue::from(u.join_date))
            .with_render(|u: &User| u.join_date.format("%b %-d, %Y").to_string()),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{SortDirection, TableView};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(id: &str, customer: &str, status: OrderStatus, cents: i64) -> Order {
        Order {
            id: id.to_string(),
            customer: customer.to_string(),
            email: format!("{}@example.com", customer.to_lowercase().replace(' ', ".")),
            status,
            total: Money::from_cents(cents),
            items: 1,
            date: date(2024, 1, 15),
            payment_method: "Credit Card".to_string(),
        }
    }

    fn orders() -> Vec<Order> {
        vec![
            order("ORD-001", "John Doe", OrderStatus::Completed, 29999),
            order("ORD-002", "Jane Smith", OrderStatus::Pending, 15950),
            order("ORD-003", "Bob Johnson", OrderStatus::Shipped, 8999),
            order("ORD-004", "Alice Brown", OrderStatus::Cancelled, 19999),
            order("ORD-005", "Charlie Wilson", OrderStatus::Processing, 45000),
            order("ORD-006", "Dana White", OrderStatus::Completed, 1001),
        ]
    }

    fn product(id: &str, stock: u32, status: ProductStatus) -> InventoryProduct {
        InventoryProduct {
            id: id.to_string(),
            name: format!("Product {}", id),
            category: "Electronics".to_string(),
            price: Money::from_cents(9999),
            stock,
            status,
        }
    }

    fn user(id: &str, role: UserRole, status: UserStatus) -> User {
        User {
            id: id.to_string(),
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
            role,
            status,
            join_date: date(2023, 6, 1),
        }
    }

    fn users() -> Vec<User> {
        vec![
            user("1", UserRole::Admin, UserStatus::Active),
            user("2", UserRole::Customer, UserStatus::Active),
            user("3", UserRole::Moderator, UserStatus::Suspended),
            user("4", UserRole::Customer, UserStatus::Inactive),
        ]
    }

    #[test]
    fn test_order_stats() {
        let stats = order_stats(&orders());
        assert_eq!(stats.total, 6);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.revenue, Money::from_cents(29999 + 1001));
    }

    #[test]
    fn test_order_stats_empty() {
        let stats = order_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.revenue, Money::zero());
    }

    #[test]
    fn test_inventory_stats() {
        let products = vec![
            product("1", 45, ProductStatus::Active),
            product("2", 5, ProductStatus::LowStock),
            product("3", 0, ProductStatus::OutOfStock),
            product("4", 1, ProductStatus::Active),
            product("5", 6, ProductStatus::Active),
        ];
        let stats = inventory_stats(&products);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.low_stock, 2);
        assert_eq!(stats.out_of_stock, 1);
    }

    #[test]
    fn test_user_stats() {
        let stats = user_stats(&users());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.admins, 1);
        assert_eq!(stats.suspended, 1);
    }

    #[test]
    fn test_toggle_suspension() {
        let source = users();

        let next = toggle_suspension(&source, "3").unwrap();
        assert_eq!(next[2].status, UserStatus::Active);

        let next = toggle_suspension(&next, "3").unwrap();
        assert_eq!(next[2].status, UserStatus::Suspended);

        let next = toggle_suspension(&source, "4").unwrap();
        assert_eq!(next[3].status, UserStatus::Suspended);
        assert_eq!(next[0].status, UserStatus::Active);

        // Source untouched
        assert_eq!(source[2].status, UserStatus::Suspended);
    }

    #[test]
    fn test_toggle_suspension_unknown_user() {
        let err = toggle_suspension(&users(), "99").unwrap_err();
        assert_eq!(err, CoreError::ItemNotFound("99".to_string()));
    }

    #[test]
    fn test_remove_by_id() {
        let next = remove_by_id(&orders(), "ORD-003").unwrap();
        assert_eq!(next.len(), 5);
        assert!(next.iter().all(|o| o.id != "ORD-003"));
        assert_eq!(next[2].id, "ORD-004");

        assert!(remove_by_id(&users(), "nobody").is_err());
    }

    #[test]
    fn test_order_table_search_and_sort() {
        let mut view = TableView::new(orders(), order_columns()).unwrap();
        view.set_global_filter("jane");
        assert_eq!(view.visible_rows().len(), 1);

        view.set_global_filter("ord-00");
        view.set_sort("total", SortDirection::Descending).unwrap();
        let ids: Vec<_> = view.visible_rows().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["ORD-005", "ORD-001", "ORD-004", "ORD-002", "ORD-003", "ORD-006"]);
    }

    #[test]
    fn test_inventory_status_column_uses_badge() {
        let products = vec![product("1", 3, ProductStatus::Active)];
        let view = TableView::new(products, inventory_columns()).unwrap();
        let row = &view.rows()[0];
        assert_eq!(view.render_cell(row, "status").unwrap(), "Low Stock");
        assert_eq!(view.render_cell(row, "price").unwrap(), "$99.99");
    }

    #[test]
    fn test_user_table_filterable_columns() {
        let view = TableView::new(users(), user_columns()).unwrap();
        let filterable: Vec<_> = view
            .column_info()
            .into_iter()
            .filter(|c| c.filterable)
            .map(|c| c.key)
            .collect();
        assert_eq!(filterable, vec!["name", "email"]);

        let row = &view.rows()[0];
        assert_eq!(view.render_cell(row, "join_date").unwrap(), "Jun 1, 2023");
    }
}
