//! Money rounding and unit price composition.
//!
//! Prices arrive as floats (the backend serves decimals, sometimes as
//! strings) but everything the cart exposes is an integer amount in the
//! smallest currency unit. The rounding rule is pinned here in one place:
//! round half away from zero (`f64::round`). Per-line behavior matches the
//! storefront: the unit price is rounded once, line totals are integer
//! multiples of it.

use crate::menu::{AddOn, MenuItem, SizeOption};

/// Rounds a monetary amount to an integer, half away from zero.
///
/// `0.5 → 1`, `-0.5 → -1`. Non-finite input contributes nothing.
pub fn round_money(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

/// Price of one unit of a specific option combination:
/// `round(base + size modifier + sum of add-on prices)`.
///
/// Missing selections contribute 0; non-finite price fields contribute 0.
/// Infallible by design — malformed menu data degrades to a cheaper price,
/// never to an error.
pub fn unit_price(menu_item: &MenuItem, size_option: Option<&SizeOption>, add_ons: &[AddOn]) -> i64 {
    let base = finite_or_zero(menu_item.price);
    let size_modifier = size_option.map_or(0.0, |s| finite_or_zero(s.price_modifier));
    let add_ons_sum: f64 = add_ons.iter().map(|a| finite_or_zero(a.price)).sum();

    let unit = round_money(base + size_modifier + add_ons_sum);
    log::trace!(
        "💰 unit_price: base={base} size_modifier={size_modifier} add_ons_sum={add_ons_sum} -> {unit}"
    );
    unit
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
