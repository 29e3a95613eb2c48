//! # Cart Handlers
//!
//! The cart lives in the client. Each request carries the full line list,
//! and the response carries the resulting list and its summary.
//!
//! ```text
//!  POST /api/cart/summary   { items, promo_code }            → { items, summary }
//!  POST /api/cart/quantity  { items, id, quantity, promo_code } → { change, items, summary }
//!  GET  /api/cart                                            → demo cart + summary
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::validation::{validate_item_id, validate_price, validate_quantity};
use storefront_core::{update_quantity, LineItem, PricingSummary, QuantityChange, MAX_CART_ITEMS};
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};
use crate::{fixtures, SharedState};

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub promo_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub summary: PricingSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuantityRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub id: String,
    pub quantity: i64,
    #[serde(default)]
    pub promo_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuantityResponse {
    pub change: QuantityChange,
    pub items: Vec<LineItem>,
    pub summary: PricingSummary,
}

/// Checks a client-supplied cart before any pricing runs.
///
/// ## Rules
/// - At most `MAX_CART_ITEMS` lines
/// - Every id valid and unique
/// - Every quantity in 1..=999, every unit price in 0..=`MAX_UNIT_PRICE`
fn validate_cart(items: &[LineItem]) -> GatewayResult<()> {
    if items.len() > MAX_CART_ITEMS {
        return Err(GatewayError::InvalidRequest(format!(
            "Cart cannot have more than {} items",
            MAX_CART_ITEMS
        )));
    }

    for (i, item) in items.iter().enumerate() {
        validate_item_id(&item.id)?;
        validate_quantity(item.quantity)?;
        validate_price(item.unit_price)?;

        if items[..i].iter().any(|other| other.id == item.id) {
            return Err(GatewayError::InvalidRequest(format!(
                "Duplicate cart line: {}",
                item.id
            )));
        }
    }

    Ok(())
}

/// Prices a cart.
pub async fn cart_summary(
    State(state): State<SharedState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> GatewayResult<Json<CartResponse>> {
    let Json(request) = payload?;
    validate_cart(&request.items)?;

    debug!(lines = request.items.len(), "cart_summary");
    let summary = state.pricing.summarize(&request.items, &request.promo_code)?;

    Ok(Json(CartResponse {
        items: request.items,
        summary,
    }))
}

/// Sets one line's quantity (0 removes it) and prices the result.
pub async fn cart_quantity(
    State(state): State<SharedState>,
    payload: Result<Json<QuantityRequest>, JsonRejection>,
) -> GatewayResult<Json<QuantityResponse>> {
    let Json(request) = payload?;
    validate_cart(&request.items)?;

    debug!(id = %request.id, quantity = request.quantity, "cart_quantity");
    let update = update_quantity(&request.items, &request.id, request.quantity)?;
    let summary = state.pricing.summarize(&update.items, &request.promo_code)?;

    Ok(Json(QuantityResponse {
        change: update.change,
        items: update.items,
        summary,
    }))
}

/// The demo cart shown on the cart page before any edits.
pub async fn demo_cart(State(state): State<SharedState>) -> GatewayResult<Json<CartResponse>> {
    let items = fixtures::demo_cart();
    let summary = state.pricing.summarize(&items, "")?;
    Ok(Json(CartResponse { items, summary }))
}
