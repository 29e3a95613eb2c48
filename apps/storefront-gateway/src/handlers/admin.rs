//! # Dashboard Handlers
//!
//! Each admin table is served as one page of a [`TableView`] plus the
//! page's summary counters.
//!
//! ## Query Parameters
//! | Param       | Meaning                                       | Default |
//! |-------------|-----------------------------------------------|---------|
//! | `q`         | search over the table's filterable columns    | empty   |
//! | `sort`      | column key to sort by                         | none    |
//! | `dir`       | `asc`, `desc` or `none`                       | `asc`   |
//! | `page`      | 0-based page index (clamped to the last page) | 0       |
//! | `page_size` | rows per page (must be positive)              | 10      |
//!
//! Product and user actions return the resulting collection without
//! storing it; the fixture data is read-only.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::dashboard::{
    inventory_columns, inventory_stats, order_columns, order_stats, remove_by_id,
    toggle_suspension, user_columns, user_stats, InventoryStats, OrderStats, UserStats,
};
use storefront_core::table::{ColumnInfo, SortState, DEFAULT_PAGE_SIZE};
use storefront_core::validation::{validate_item_id, validate_search_query};
use storefront_core::{Column, InventoryProduct, Order, SortDirection, TableView, User};
use tracing::{debug, info};

use crate::error::GatewayResult;
use crate::SharedState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableParams {
    #[serde(default)]
    pub q: String,
    pub sort: Option<String>,
    pub dir: Option<SortDirection>,
    #[serde(default)]
    pub page: usize,
    pub page_size: Option<usize>,
}

/// One page of an admin table.
#[derive(Debug, Clone, Serialize)]
pub struct TableResponse<R, S> {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<R>,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total_rows: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub sort: Option<SortState>,
    pub stats: S,
}

/// Runs filter → sort → paginate over `rows` as described by `params`.
fn table_page<R: Clone, S>(
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    params: &TableParams,
    stats: S,
) -> GatewayResult<TableResponse<R, S>> {
    let query = validate_search_query(&params.q)?;

    let mut view = TableView::new(rows, columns)?;
    view.set_global_filter(query);

    if let Some(column) = params.sort.as_deref().filter(|c| !c.is_empty()) {
        let direction = params.dir.unwrap_or(SortDirection::Ascending);
        view.set_sort(column, direction)?;
    }

    view.set_page(params.page, params.page_size.unwrap_or(DEFAULT_PAGE_SIZE))?;

    let page = view.page();
    Ok(TableResponse {
        columns: view.column_info(),
        rows: page.rows.into_iter().cloned().collect(),
        page_index: page.page_index,
        page_size: page.page_size,
        page_count: page.page_count,
        total_rows: page.total_rows,
        has_previous: page.has_previous,
        has_next: page.has_next,
        sort: view.sort_state().cloned(),
        stats,
    })
}

pub async fn list_orders(
    State(state): State<SharedState>,
    params: Result<Query<TableParams>, QueryRejection>,
) -> GatewayResult<Json<TableResponse<Order, OrderStats>>> {
    let Query(params) = params?;
    debug!(?params, "list_orders");

    let stats = order_stats(&state.orders);
    Ok(Json(table_page(state.orders.clone(), order_columns(), &params, stats)?))
}

pub async fn list_products(
    State(state): State<SharedState>,
    params: Result<Query<TableParams>, QueryRejection>,
) -> GatewayResult<Json<TableResponse<InventoryProduct, InventoryStats>>> {
    let Query(params) = params?;
    debug!(?params, "list_products");

    let stats = inventory_stats(&state.inventory);
    Ok(Json(table_page(
        state.inventory.clone(),
        inventory_columns(),
        &params,
        stats,
    )?))
}

pub async fn list_users(
    State(state): State<SharedState>,
    params: Result<Query<TableParams>, QueryRejection>,
) -> GatewayResult<Json<TableResponse<User, UserStats>>> {
    let Query(params) = params?;
    debug!(?params, "list_users");

    let stats = user_stats(&state.users);
    Ok(Json(table_page(state.users.clone(), user_columns(), &params, stats)?))
}

/// Inventory after an action, with recomputed counters.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryResponse {
    pub products: Vec<InventoryProduct>,
    pub stats: InventoryStats,
}

pub async fn delete_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> GatewayResult<Json<InventoryResponse>> {
    validate_item_id(&id)?;

    let products = remove_by_id(&state.inventory, &id)?;
    info!(%id, "product deleted");
    Ok(Json(InventoryResponse {
        stats: inventory_stats(&products),
        products,
    }))
}

/// Users after an action, with recomputed counters.
#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
    pub stats: UserStats,
}

/// Suspends an active or inactive user, or reinstates a suspended one.
pub async fn toggle_user_suspension(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> GatewayResult<Json<UsersResponse>> {
    validate_item_id(&id)?;

    let users = toggle_suspension(&state.users, &id)?;
    info!(%id, "user suspension toggled");
    Ok(Json(UsersResponse {
        stats: user_stats(&users),
        users,
    }))
}

pub async fn delete_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> GatewayResult<Json<UsersResponse>> {
    validate_item_id(&id)?;

    let users = remove_by_id(&state.users, &id)?;
    info!(%id, "user deleted");
    Ok(Json(UsersResponse {
        stats: user_stats(&users),
        users,
    }))
}
