//! The cart state value and its queries.
//!
//! `CartState` serializes to the exact JSON layout the Mini App persists
//! under its storage key (camelCase fields: `items`, `total`, `discount`,
//! `deliveryFee`, `finalTotal`, `appliedPromotion`) plus a `schemaVersion`
//! field so the layout can evolve safely.

use serde::{Deserialize, Serialize};

use crate::menu::{AddOn, MenuItem, Promotion, SizeOption};

/// Version written into every persisted snapshot. Snapshots with a newer
/// version than this are discarded on load instead of being misread.
pub const SCHEMA_VERSION: u32 = 1;

/// One distinct (menu item, size, add-on set) entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Deterministic identity of the option combination, see `cart::key`.
    pub key: String,
    pub menu_item: MenuItem,
    /// Always ≥ 1. A line decremented to zero is removed, never stored.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_option: Option<SizeOption>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    /// `quantity × unit price`, recomputed on every mutation.
    pub total_price: i64,
}

/// The whole cart. Items are kept newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub items: Vec<CartLine>,
    /// Sum of all line totals.
    #[serde(default)]
    pub total: i64,
    /// Discount from the applied promotion; 0 when none is applied.
    #[serde(default)]
    pub discount: i64,
    /// Delivery fee as composed by the applied promotion; 0 when none.
    #[serde(default)]
    pub delivery_fee: i64,
    /// `total − discount + delivery_fee`; equals `total` without a promotion.
    #[serde(default)]
    pub final_total: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_promotion: Option<Promotion>,
}

impl CartState {
    /// The canonical empty cart.
    pub fn empty() -> Self {
        CartState {
            schema_version: SCHEMA_VERSION,
            items: Vec::new(),
            total: 0,
            discount: 0,
            delivery_fee: 0,
            final_total: 0,
            applied_promotion: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up the line with the given identity key.
    pub fn line_by_key(&self, key: &str) -> Option<&CartLine> {
        self.items.iter().find(|line| line.key == key)
    }

    /// Total quantity of a menu item across all of its variants — the
    /// "N in cart" badge on a menu tile that doesn't know which size or
    /// add-ons were picked.
    pub fn count_for_menu_item(&self, menu_item_id: i64) -> u32 {
        self.items
            .iter()
            .filter(|line| line.menu_item.id == menu_item_id)
            .map(|line| line.quantity)
            .sum()
    }

    /// Total number of units in the cart.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

impl Default for CartState {
    fn default() -> Self {
        CartState::empty()
    }
}
