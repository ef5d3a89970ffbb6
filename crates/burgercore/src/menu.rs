//! Serde model of the menu API shapes consumed by the cart engine.
//!
//! The shapes mirror what the Mini App backend serves: `MenuItem` with its
//! `size_options` / `add_on_options`, and `Promotion` for discounts. The
//! backend serializes decimal prices as strings ("129.00"), and partially
//! loaded menu data may miss price fields entirely, so every monetary field
//! goes through a lenient deserializer that maps anything non-numeric to 0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Size variant of a menu item (e.g. Small / Large).
///
/// `price_modifier` is a signed amount added to the item's base price.
/// Inactive sizes are filtered at the presentation layer, never by the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeOption {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::price")]
    pub price_modifier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Add-on option (sauces, extra cheese, ...). Price is non-negative and
/// added on top of the base price per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::price")]
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A dish on the menu. Immutable from the cart's perspective; owned by the
/// menu-loading layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::price")]
    pub price: f64,
    #[serde(default)]
    pub category: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_hit: bool,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub size_options: Vec<SizeOption>,
    #[serde(default)]
    pub add_on_options: Vec<AddOn>,
}

impl MenuItem {
    /// Size options a user is allowed to pick. The cart itself never
    /// filters by `is_active`; the presentation layer calls this before
    /// offering choices.
    pub fn active_size_options(&self) -> impl Iterator<Item = &SizeOption> {
        self.size_options.iter().filter(|s| s.is_active)
    }

    /// Add-ons a user is allowed to pick.
    pub fn active_add_ons(&self) -> impl Iterator<Item = &AddOn> {
        self.add_on_options.iter().filter(|a| a.is_active)
    }
}

/// Discount kind, serialized in the backend's SCREAMING_SNAKE form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percent,
    FixedAmount,
    FreeItem,
    FreeDelivery,
}

/// Promotion as served by the backend. Validity and discount math live in
/// the `promotions` module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub discount_type: DiscountType,
    #[serde(default, deserialize_with = "lenient::price")]
    pub discount_value: f64,
    #[serde(default, deserialize_with = "lenient::opt_price")]
    pub min_order_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_price")]
    pub max_discount: Option<f64>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_items: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_item: Option<i64>,
}

fn default_true() -> bool {
    true
}

/// Lenient deserialization of monetary fields.
///
/// Accepts a JSON number, a numeric string (Django DecimalField is
/// serialized as `"129.00"`), or null/missing. Anything that does not parse
/// as a number becomes 0.0 rather than failing the whole payload — the cart
/// must tolerate partially loaded menu data.
mod lenient {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct LenientPrice;

    impl<'de> Visitor<'de> for LenientPrice {
        type Value = f64;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a number, a numeric string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            Ok(v.trim().parse().unwrap_or(0.0))
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(0.0)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<f64, D::Error> {
            deserializer.deserialize_any(LenientPrice)
        }
    }

    pub(super) fn price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(LenientPrice)
    }

    struct OptLenientPrice;

    impl<'de> Visitor<'de> for OptLenientPrice {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a number, a numeric string, or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(LenientPrice).map(Some)
        }
    }

    pub(super) fn opt_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        deserializer.deserialize_option(OptLenientPrice)
    }
}
