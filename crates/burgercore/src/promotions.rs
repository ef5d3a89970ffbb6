//! Promotion validity and discount computation.
//!
//! Ported from the ordering backend: a promotion applies only inside its
//! validity window and usage budget, and the discount it yields depends on
//! its type. All monetary results go through the cart's pinned rounding
//! rule so `discount` composes exactly with the integer cart totals.
//!
//! The free-item variant yields no monetary discount here — adding the free
//! line to the cart is the caller's job, since it requires a menu lookup.

use chrono::{DateTime, Utc};

use crate::cart::pricing::round_money;
use crate::menu::{DiscountType, Promotion};

/// Checks whether a promotion can be applied at `now`.
///
/// A promotion is valid when it is active, `now` falls inside
/// `[valid_from, valid_to]`, and the usage counter has not exhausted
/// `max_uses`.
pub fn is_valid(promotion: &Promotion, now: DateTime<Utc>) -> bool {
    if !promotion.is_active || promotion.valid_from > now || promotion.valid_to < now {
        return false;
    }

    if let Some(max_uses) = promotion.max_uses {
        if promotion.usage_count >= max_uses {
            return false;
        }
    }

    true
}

/// Computes `(discount, delivery_fee)` for an order subtotal.
///
/// Mirrors the backend's `calculate_discount`:
/// - invalid promotion or subtotal below `min_order_amount` → no discount,
///   fee unchanged
/// - `Percent` → `total × value / 100`, capped by `max_discount`
/// - `FixedAmount` → `min(value, total)` (a discount never exceeds the
///   subtotal)
/// - `FreeDelivery` → no discount, fee zeroed
/// - `FreeItem` → no monetary discount, fee unchanged
pub fn calculate_discount(
    promotion: &Promotion,
    order_total: i64,
    delivery_fee: i64,
    now: DateTime<Utc>,
) -> (i64, i64) {
    if !is_valid(promotion, now) {
        return (0, delivery_fee);
    }

    if let Some(min_order) = promotion.min_order_amount {
        if (order_total as f64) < min_order {
            return (0, delivery_fee);
        }
    }

    match promotion.discount_type {
        DiscountType::Percent => {
            let mut discount = order_total as f64 * promotion.discount_value / 100.0;
            if let Some(max_discount) = promotion.max_discount {
                discount = discount.min(max_discount);
            }
            (round_money(discount).min(order_total), delivery_fee)
        }
        DiscountType::FixedAmount => {
            (round_money(promotion.discount_value).min(order_total).max(0), delivery_fee)
        }
        DiscountType::FreeDelivery => (0, 0),
        DiscountType::FreeItem => (0, delivery_fee),
    }
}
