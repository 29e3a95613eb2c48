//! # Catalog Handlers
//!
//! ```text
//!  GET /api/products?q=bike               name / description / category search
//!  GET /api/products?q=bike&category=bikes  category page: slug match, then
//!                                           name / description search
//!  GET /products/{id}?quantity=3          detail with derived display values
//! ```

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::catalog::{filter_catalog, filter_catalog_in, items_in_category, SearchScope};
use storefront_core::validation::{validate_item_id, validate_search_query};
use storefront_core::{CatalogItem, Money};
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};
use crate::SharedState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    /// Category slug, as in `/category/bikes`.
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub products: Vec<CatalogItem>,
}

/// Searches the catalog.
///
/// An empty query returns the whole catalog (or the whole category) in
/// catalog order.
pub async fn search_products(
    State(state): State<SharedState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> GatewayResult<Json<SearchResponse>> {
    let Query(params) = params?;
    let query = validate_search_query(&params.q)?;

    let products: Vec<CatalogItem> = match params.category.as_deref() {
        Some(slug) => {
            let in_category: Vec<CatalogItem> = items_in_category(&state.catalog, slug)
                .into_iter()
                .cloned()
                .collect();
            filter_catalog_in(&in_category, query, SearchScope::NameDescription)
                .into_iter()
                .cloned()
                .collect()
        }
        None => filter_catalog(&state.catalog, query)
            .into_iter()
            .cloned()
            .collect(),
    };

    debug!(query, category = ?params.category, hits = products.len(), "search_products");
    Ok(Json(SearchResponse {
        query: query.to_string(),
        total: products.len(),
        products,
    }))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailParams {
    /// Requested picker value; clamped to what is in stock.
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub product: CatalogItem,
    pub category_slug: String,
    /// Original price minus current price, when discounted.
    pub savings: Option<Money>,
    pub full_stars: u8,
    pub in_stock: bool,
    /// Quantity picker value after clamping.
    pub quantity: i64,
}

/// Product detail page data.
pub async fn product_detail(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    params: Result<Query<DetailParams>, QueryRejection>,
) -> GatewayResult<Json<ProductDetail>> {
    let Query(params) = params?;
    validate_item_id(&id)?;

    let product = state
        .catalog
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| GatewayError::not_found("Product", id.as_str()))?;

    Ok(Json(ProductDetail {
        category_slug: product.category_slug(),
        savings: product.savings(),
        full_stars: product.full_stars(),
        in_stock: product.stock_count > 0,
        quantity: product.clamp_selection(params.quantity.unwrap_or(1)),
        product: product.clone(),
    }))
}
