//! Line-item identity.
//!
//! Two additions of the same menu item with the same size and the same
//! add-on set must land on the same cart line; any difference in size or
//! add-on set must produce a distinct line. The key is the string
//! `"{item}|{size}|{sorted add-on ids}"` — deterministic regardless of the
//! order in which add-ons were picked.

use itertools::Itertools;

use crate::menu::{AddOn, MenuItem, SizeOption};

/// Sentinel size id used when no size is selected.
///
/// Real size ids come from the backend's autoincrement primary keys and are
/// never 0, so the sentinel cannot collide with an actual selection.
pub const NO_SIZE_SENTINEL: i64 = 0;

/// Builds the identity key for an option combination.
///
/// Add-on ids are sorted ascending and deduplicated before joining, so
/// `[2, 1]` and `[1, 2]` (and `[1, 1, 2]`) all yield the same key.
pub fn line_key(menu_item_id: i64, size_option_id: Option<i64>, add_on_ids: &[i64]) -> String {
    let size_id = size_option_id.unwrap_or(NO_SIZE_SENTINEL);
    let add_ons = add_on_ids.iter().copied().sorted().dedup().join(",");
    format!("{menu_item_id}|{size_id}|{add_ons}")
}

/// Convenience wrapper building the key straight from domain values.
pub fn line_key_for(menu_item: &MenuItem, size_option: Option<&SizeOption>, add_ons: &[AddOn]) -> String {
    let add_on_ids: Vec<i64> = add_ons.iter().map(|a| a.id).collect();
    line_key(menu_item.id, size_option.map(|s| s.id), &add_on_ids)
}
