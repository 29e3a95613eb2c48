//! # Cart Pricing
//!
//! Derives the cart summary from the line items and the promo code, and
//! applies quantity edits by returning a new collection.
//!
//! ## Summary Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Summary (cart page)                           │
//! │                                                                         │
//! │  subtotal  = Σ unit_price × quantity                                    │
//! │  shipping  = 0        if subtotal >  $100.00                            │
//! │            = $10.00   otherwise (exactly $100.00 still pays)            │
//! │  tax       = subtotal × 8%                                              │
//! │  discount  = subtotal × 10%   if promo == "SAVE10" (case sensitive)     │
//! │            = 0                otherwise                                 │
//! │  ────────────────────────────────────────────────                       │
//! │  total     = subtotal + shipping + tax − discount   (never clamped)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is cached: every call starts from the full item list.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Identified, LineItem, Rate};
use crate::validation::{validate_cart_size, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Pricing Policy
// =============================================================================

/// Subtotal above which shipping is free: $100.00.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(10000);

/// Flat shipping fee below the threshold: $10.00.
pub const SHIPPING_FEE: Money = Money::from_cents(1000);

/// Sales tax on the subtotal: 8%.
pub const TAX_RATE: Rate = Rate::from_bps(800);

/// The one promo code the storefront accepts.
pub const PROMO_CODE: &str = "SAVE10";

/// Discount granted by the promo code: 10% of the subtotal.
pub const PROMO_RATE: Rate = Rate::from_bps(1000);

/// The constants that drive the cart summary.
///
/// `PricingPolicy::default()` is exactly the storefront's fixed pricing;
/// the gateway may build a different one from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Shipping is free when the subtotal is strictly greater than this.
    pub free_shipping_threshold: Money,
    pub shipping_fee: Money,
    pub tax_rate: Rate,
    /// Compared with the entered code byte for byte.
    pub promo_code: String,
    pub promo_rate: Rate,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            shipping_fee: SHIPPING_FEE,
            tax_rate: TAX_RATE,
            promo_code: PROMO_CODE.to_string(),
            promo_rate: PROMO_RATE,
        }
    }
}

impl PricingPolicy {
    /// Computes the pricing summary for `items` and the raw promo code.
    ///
    /// Every sum is checked: an amount that does not fit in [`Money`]
    /// yields [`CoreError::AmountOverflow`] instead of a wrapped total.
    pub fn summarize(&self, items: &[LineItem], promo_code: &str) -> CoreResult<PricingSummary> {
        let subtotal = items.iter().try_fold(Money::zero(), |acc, item| {
            acc.checked_add(item.line_total()?).ok_or_else(|| overflow("subtotal"))
        })?;

        let total_quantity = items
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.quantity))
            .ok_or_else(|| overflow("total quantity"))?;

        let shipping = if subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.shipping_fee
        };

        let tax = subtotal.portion(self.tax_rate);

        let promo_applied = promo_code == self.promo_code;
        let discount = if promo_applied {
            subtotal.portion(self.promo_rate)
        } else {
            Money::zero()
        };

        let total = subtotal
            .checked_add(shipping)
            .and_then(|sum| sum.checked_add(tax))
            .and_then(|sum| sum.checked_sub(discount))
            .ok_or_else(|| overflow("total"))?;

        Ok(PricingSummary {
            item_count: items.len(),
            total_quantity,
            subtotal,
            shipping,
            tax,
            discount,
            promo_applied,
            total,
        })
    }
}

fn overflow(at: &str) -> CoreError {
    CoreError::AmountOverflow { at: at.to_string() }
}

// =============================================================================
// Pricing Summary
// =============================================================================

/// Cart totals, derived on every read and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingSummary {
    /// Distinct lines in the cart.
    pub item_count: usize,
    /// Sum of all line quantities.
    pub total_quantity: i64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub discount: Money,
    /// Whether the entered promo code matched.
    pub promo_applied: bool,
    pub total: Money,
}

/// Computes the cart summary with the storefront's fixed pricing.
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::pricing::compute_cart_summary;
///
/// let summary = compute_cart_summary(&[], "").unwrap();
/// assert_eq!(summary.subtotal, Money::zero());
/// assert_eq!(summary.shipping, Money::from_cents(1000));
/// assert_eq!(summary.total, Money::from_cents(1000));
/// ```
pub fn compute_cart_summary(items: &[LineItem], promo_code: &str) -> CoreResult<PricingSummary> {
    PricingPolicy::default().summarize(items, promo_code)
}

// =============================================================================
// Quantity Edits
// =============================================================================

/// What a quantity edit did to the edited line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuantityChange {
    /// The line is still in the cart with the new quantity.
    Updated,
    /// The quantity went to zero and the line was dropped.
    Removed,
}

/// Result of [`update_quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuantityUpdate {
    pub items: Vec<LineItem>,
    pub change: QuantityChange,
}

/// Sets the quantity of line `id` and returns the resulting collection.
///
/// ## Behavior
/// ```text
/// new_quantity < 0     → Err(NegativeQuantity)      (input untouched)
/// id not in items      → Err(ItemNotFound)          (input untouched)
/// new_quantity == 0    → line dropped, Removed
/// new_quantity > 999   → Err(QuantityTooLarge)
/// otherwise            → that line's quantity replaced, Updated
/// ```
/// Other lines keep their quantity and relative order.
pub fn update_quantity(
    items: &[LineItem],
    id: &str,
    new_quantity: i64,
) -> CoreResult<QuantityUpdate> {
    if new_quantity < 0 {
        return Err(CoreError::NegativeQuantity {
            id: id.to_string(),
            requested: new_quantity,
        });
    }

    if !items.iter().any(|item| item.id() == id) {
        return Err(CoreError::ItemNotFound(id.to_string()));
    }

    if new_quantity == 0 {
        debug!(id, "quantity set to zero, removing line");
        return Ok(QuantityUpdate {
            items: remove_item(items, id)?,
            change: QuantityChange::Removed,
        });
    }

    if new_quantity > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: new_quantity,
            max: MAX_ITEM_QUANTITY,
        });
    }

    debug!(id, new_quantity, "updating line quantity");
    let items = items
        .iter()
        .map(|item| {
            if item.id == id {
                LineItem {
                    quantity: new_quantity,
                    ..item.clone()
                }
            } else {
                item.clone()
            }
        })
        .collect();

    Ok(QuantityUpdate {
        items,
        change: QuantityChange::Updated,
    })
}

/// Returns `items` without line `id`.
pub fn remove_item(items: &[LineItem], id: &str) -> CoreResult<Vec<LineItem>> {
    crate::dashboard::remove_by_id(items, id)
}

/// Adds a line, merging with an existing line of the same id.
///
/// ## Behavior
/// - Same id already present: quantities add up (max 999)
/// - New id: appended, as long as the cart holds fewer than 100 lines
pub fn add_item(items: &[LineItem], item: LineItem) -> CoreResult<Vec<LineItem>> {
    validate_quantity(item.quantity)?;

    if let Some(existing) = items.iter().find(|i| i.id == item.id) {
        let merged = existing.quantity + item.quantity;
        if merged > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: merged,
                max: MAX_ITEM_QUANTITY,
            });
        }
        return Ok(update_quantity(items, &item.id, merged)?.items);
    }

    validate_cart_size(items.len()).map_err(|_| CoreError::CartTooLarge {
        max: MAX_CART_ITEMS,
    })?;

    let mut next = items.to_vec();
    next.push(item);
    Ok(next)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, cents: i64, quantity: i64) -> LineItem {
        LineItem::new(id, format!("Item {}", id), "Electronics", Money::from_cents(cents), quantity)
    }

    fn sample_cart() -> Vec<LineItem> {
        vec![
            LineItem::new("1", "Mountain Bike Pro", "Bikes", Money::from_cents(89999), 1),
            LineItem::new("2", "Gaming Laptop Ultra", "Electronics", Money::from_cents(159999), 1),
            LineItem::new("3", "Smart Phone X1", "Electronics", Money::from_cents(79999), 2),
        ]
    }

    #[test]
    fn test_subtotal_is_exact_sum() {
        let summary = compute_cart_summary(&sample_cart(), "").unwrap();
        assert_eq!(summary.subtotal.cents(), 89999 + 159999 + 79999 * 2);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total_quantity, 4);
    }

    #[test]
    fn test_empty_cart_summary() {
        let summary = compute_cart_summary(&[], "").unwrap();
        assert_eq!(summary.subtotal, Money::zero());
        assert_eq!(summary.shipping, Money::from_cents(1000));
        assert_eq!(summary.tax, Money::zero());
        assert_eq!(summary.discount, Money::zero());
        assert_eq!(summary.total, Money::from_cents(1000));
        assert!(!summary.promo_applied);
    }

    #[test]
    fn test_promo_code_is_case_sensitive() {
        let items = vec![line("a", 20000, 1)];

        let with_promo = compute_cart_summary(&items, "SAVE10").unwrap();
        assert_eq!(with_promo.discount, Money::from_cents(2000));
        assert!(with_promo.promo_applied);

        let lower = compute_cart_summary(&items, "save10").unwrap();
        assert_eq!(lower.discount, Money::zero());
        assert!(!lower.promo_applied);

        let padded = compute_cart_summary(&items, " SAVE10").unwrap();
        assert_eq!(padded.discount, Money::zero());
    }

    #[test]
    fn test_summary_total_formula() {
        // $200 subtotal: free shipping, $16 tax, $20 off
        let summary = compute_cart_summary(&[line("a", 20000, 1)], "SAVE10").unwrap();
        assert_eq!(summary.shipping, Money::zero());
        assert_eq!(summary.tax, Money::from_cents(1600));
        assert_eq!(summary.total, Money::from_cents(20000 + 1600 - 2000));
    }

    #[test]
    fn test_free_shipping_threshold_is_strict() {
        let at_threshold = compute_cart_summary(&[line("a", 10000, 1)], "").unwrap();
        assert_eq!(at_threshold.shipping, Money::from_cents(1000));

        let above = compute_cart_summary(&[line("a", 10001, 1)], "").unwrap();
        assert_eq!(above.shipping, Money::zero());
    }

    #[test]
    fn test_summary_overflow_is_an_error() {
        // Each line is representable on its own; the product is not
        let huge = vec![line("a", i64::MAX / 2 + 1, 2)];
        assert!(matches!(
            compute_cart_summary(&huge, ""),
            Err(CoreError::AmountOverflow { .. })
        ));

        // Two lines whose totals fit but whose sum does not
        let wide = vec![line("a", i64::MAX / 2 + 1, 1), line("b", i64::MAX / 2 + 1, 1)];
        assert!(matches!(
            compute_cart_summary(&wide, ""),
            Err(CoreError::AmountOverflow { ref at }) if at == "subtotal"
        ));
    }

    #[test]
    fn test_largest_valid_cart_fits() {
        let max_price = crate::validation::MAX_UNIT_PRICE.cents();
        let items: Vec<LineItem> = (0..MAX_CART_ITEMS)
            .map(|i| line(&i.to_string(), max_price, MAX_ITEM_QUANTITY))
            .collect();

        let summary = compute_cart_summary(&items, "SAVE10").unwrap();
        assert_eq!(
            summary.subtotal.cents(),
            max_price * MAX_ITEM_QUANTITY * MAX_CART_ITEMS as i64
        );
        assert!(summary.total.is_positive());
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            free_shipping_threshold: Money::from_cents(5000),
            shipping_fee: Money::from_cents(499),
            tax_rate: Rate::zero(),
            promo_code: "WELCOME".to_string(),
            promo_rate: Rate::from_bps(2500),
        };

        let summary = policy.summarize(&[line("a", 4000, 1)], "WELCOME").unwrap();
        assert_eq!(summary.shipping, Money::from_cents(499));
        assert_eq!(summary.tax, Money::zero());
        assert_eq!(summary.discount, Money::from_cents(1000));
        assert_eq!(summary.total, Money::from_cents(4000 + 499 - 1000));
    }

    #[test]
    fn test_update_quantity_replaces_only_target() {
        let items = sample_cart();
        let update = update_quantity(&items, "2", 5).unwrap();

        assert_eq!(update.change, QuantityChange::Updated);
        assert_eq!(update.items.len(), 3);
        assert_eq!(update.items[1].quantity, 5);
        assert_eq!(update.items[0].quantity, 1);
        assert_eq!(update.items[2].quantity, 2);
        // Source collection is untouched
        assert_eq!(items[1].quantity, 1);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let items = sample_cart();
        let update = update_quantity(&items, "1", 0).unwrap();

        assert_eq!(update.change, QuantityChange::Removed);
        assert_eq!(update.items.len(), items.len() - 1);
        assert!(update.items.iter().all(|i| i.id != "1"));
        assert_eq!(update.items[0].id, "2");
        assert_eq!(update.items[0].quantity, 1);
        assert_eq!(update.items[1].quantity, 2);
    }

    #[test]
    fn test_update_quantity_negative_is_rejected() {
        let err = update_quantity(&sample_cart(), "1", -1).unwrap_err();
        assert_eq!(
            err,
            CoreError::NegativeQuantity {
                id: "1".to_string(),
                requested: -1
            }
        );
    }

    #[test]
    fn test_update_quantity_unknown_id() {
        let err = update_quantity(&sample_cart(), "99", 2).unwrap_err();
        assert_eq!(err, CoreError::ItemNotFound("99".to_string()));
    }

    #[test]
    fn test_update_quantity_too_large() {
        let err = update_quantity(&sample_cart(), "1", 1000).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { requested: 1000, .. }));
    }

    #[test]
    fn test_add_item_merges_same_id() {
        let items = sample_cart();
        let next = add_item(&items, line("3", 79999, 3)).unwrap();
        assert_eq!(next.len(), 3);
        assert_eq!(next[2].quantity, 5);
    }

    #[test]
    fn test_add_item_appends_new_line() {
        let next = add_item(&sample_cart(), line("4", 12999, 1)).unwrap();
        assert_eq!(next.len(), 4);
        assert_eq!(next[3].id, "4");
    }

    #[test]
    fn test_add_item_limits() {
        let err = add_item(&[line("a", 100, 998)], line("a", 100, 2)).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { requested: 1000, .. }));

        let full: Vec<LineItem> = (0..MAX_CART_ITEMS)
            .map(|i| line(&i.to_string(), 100, 1))
            .collect();
        let err = add_item(&full, line("new", 100, 1)).unwrap_err();
        assert_eq!(err, CoreError::CartTooLarge { max: MAX_CART_ITEMS });

        let err = add_item(&[], line("a", 100, 0)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_remove_item() {
        let next = remove_item(&sample_cart(), "2").unwrap();
        assert_eq!(next.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["1", "3"]);

        assert!(remove_item(&sample_cart(), "nope").is_err());
    }
}
