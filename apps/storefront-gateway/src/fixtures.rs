//! # Fixture Data
//!
//! The mock catalog and admin records the gateway serves. Stands in for a
//! data source until one is wired up.
//!
//! Each table below is plain tuples so the data reads like a spreadsheet:
//! - Catalog: six products across Bikes, Electronics and Fashion
//! - Orders: five orders, one per status
//! - Inventory: five products covering active, low and out of stock
//! - Users: five accounts covering every role

use chrono::NaiveDate;
use storefront_core::{
    CatalogItem, InventoryProduct, LineItem, Money, Order, OrderStatus, ProductStatus, User,
    UserRole, UserStatus,
};

// (id, name, description, category, price, original price, rating, reviews, new, sale, stock)
type CatalogRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    i64,
    Option<i64>,
    f32,
    u32,
    bool,
    bool,
    u32,
);

const CATALOG: &[CatalogRow] = &[
    ("1", "Mountain Bike Pro", "High-performance mountain bike for trail riding", "Bikes", 89999, Some(119999), 4.5, 128, false, true, 15),
    ("2", "Gaming Laptop Ultra", "Powerful gaming laptop with RTX graphics", "Electronics", 159999, None, 4.8, 89, true, false, 8),
    ("3", "Smart Phone X1", "Latest smartphone with advanced camera", "Electronics", 79999, Some(89999), 4.6, 256, false, true, 0),
    ("4", "Designer T-Shirt", "Premium cotton t-shirt with modern design", "Fashion", 2999, None, 4.3, 45, true, false, 50),
    ("5", "Road Bike Elite", "Lightweight carbon fiber road bike", "Bikes", 129999, Some(149999), 4.7, 73, false, true, 3),
    ("6", "Wireless Headphones", "Premium noise-canceling headphones", "Electronics", 19999, None, 4.4, 167, false, false, 25),
];

// (id, customer, email, status, total, items, date, payment method)
type OrderRow = (&'static str, &'static str, &'static str, OrderStatus, i64, u32, (i32, u32, u32), &'static str);

const ORDERS: &[OrderRow] = &[
    ("ORD-001", "John Doe", "john@example.com", OrderStatus::Completed, 29999, 3, (2024, 1, 20), "Credit Card"),
    ("ORD-002", "Jane Smith", "jane@example.com", OrderStatus::Pending, 15950, 2, (2024, 1, 20), "PayPal"),
    ("ORD-003", "Mike Johnson", "mike@example.com", OrderStatus::Shipped, 8999, 1, (2024, 1, 19), "Credit Card"),
    ("ORD-004", "Sarah Wilson", "sarah@example.com", OrderStatus::Cancelled, 19999, 2, (2024, 1, 19), "Debit Card"),
    ("ORD-005", "Alex Brown", "alex@example.com", OrderStatus::Processing, 44999, 4, (2024, 1, 18), "Credit Card"),
];

// (id, name, category, price, stock, status)
type InventoryRow = (&'static str, &'static str, &'static str, i64, u32, ProductStatus);

const INVENTORY: &[InventoryRow] = &[
    ("1", "Mountain Bike Pro", "Bikes", 89999, 15, ProductStatus::Active),
    ("2", "Gaming Laptop Ultra", "Electronics", 159999, 8, ProductStatus::Active),
    ("3", "Smart Phone X1", "Electronics", 79999, 0, ProductStatus::OutOfStock),
    ("4", "Designer T-Shirt", "Fashion", 2999, 50, ProductStatus::Active),
    ("5", "Road Bike Elite", "Bikes", 129999, 3, ProductStatus::LowStock),
];

// (id, name, email, role, status, joined)
type UserRow = (&'static str, &'static str, &'static str, UserRole, UserStatus, (i32, u32, u32));

const USERS: &[UserRow] = &[
    ("1", "John Doe", "john.doe@example.com", UserRole::Customer, UserStatus::Active, (2024, 1, 15)),
    ("2", "Jane Smith", "jane.smith@example.com", UserRole::Admin, UserStatus::Active, (2023, 12, 10)),
    ("3", "Mike Johnson", "mike.johnson@example.com", UserRole::Customer, UserStatus::Suspended, (2024, 1, 5)),
    ("4", "Sarah Wilson", "sarah.wilson@example.com", UserRole::Customer, UserStatus::Active, (2024, 1, 20)),
    ("5", "Alex Brown", "alex.brown@example.com", UserRole::Moderator, UserStatus::Active, (2024, 1, 12)),
];

fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
    // Fixture dates are literals above; an invalid one falls back to the epoch
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// The storefront catalog.
pub fn catalog() -> Vec<CatalogItem> {
    CATALOG
        .iter()
        .map(
            |&(id, name, description, category, price, original, rating, reviews, is_new, is_on_sale, stock)| {
                CatalogItem {
                    id: id.to_string(),
                    name: name.to_string(),
                    description: description.to_string(),
                    category: category.to_string(),
                    rating,
                    review_count: reviews,
                    price: Money::from_cents(price),
                    original_price: original.map(Money::from_cents),
                    is_new,
                    is_on_sale,
                    stock_count: stock,
                }
            },
        )
        .collect()
}

/// The demo cart: one bike, one laptop, two phones.
pub fn demo_cart() -> Vec<LineItem> {
    let catalog = catalog();
    [("1", 1), ("2", 1), ("3", 2)]
        .iter()
        .filter_map(|&(id, qty)| {
            catalog
                .iter()
                .find(|item| item.id == id)
                .map(|item| LineItem::from_catalog(item, qty))
        })
        .collect()
}

pub fn orders() -> Vec<Order> {
    ORDERS
        .iter()
        .map(|&(id, customer, email, status, total, items, day, payment)| Order {
            id: id.to_string(),
            customer: customer.to_string(),
            email: email.to_string(),
            status,
            total: Money::from_cents(total),
            items,
            date: date(day),
            payment_method: payment.to_string(),
        })
        .collect()
}

pub fn inventory() -> Vec<InventoryProduct> {
    INVENTORY
        .iter()
        .map(|&(id, name, category, price, stock, status)| InventoryProduct {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price: Money::from_cents(price),
            stock,
            status,
        })
        .collect()
}

pub fn users() -> Vec<User> {
    USERS
        .iter()
        .map(|&(id, name, email, role, status, joined)| User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            status,
            join_date: date(joined),
        })
        .collect()
}
