//! Pure mutation engine: `reduce(state, action) → new state`.
//!
//! Every mutation returns a fresh `CartState`; nothing is mutated in place.
//! Aggregate totals are recomputed from scratch after each action — never
//! incrementally adjusted, so they cannot drift from the line totals.
//! Mutations referencing an unknown line key are no-ops. The only ambient
//! input is the clock (promotion validity); `reduce_at` takes it as a
//! parameter and `reduce` is the wall-clock convenience wrapper.

use chrono::{DateTime, Utc};

use crate::cart::key::line_key_for;
use crate::cart::pricing::unit_price;
use crate::cart::state::{CartLine, CartState, SCHEMA_VERSION};
use crate::menu::{AddOn, MenuItem, Promotion, SizeOption};
use crate::promotions;

/// All cart mutations. The session funnels every state change through
/// exactly one `reduce` call per action, so one mutation is fully applied
/// (including the totals recompute) before the next is accepted.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adopt a restored snapshot, reconciling it against current prices.
    Init(CartState),
    /// Add one unit of an option combination; aggregates by key.
    AddItem {
        menu_item: MenuItem,
        size_option: Option<SizeOption>,
        add_ons: Vec<AddOn>,
    },
    IncrementByKey { key: String },
    /// Decrementing the last unit removes the line entirely.
    DecrementByKey { key: String },
    RemoveByKey { key: String },
    /// Apply a promotion on top of the item totals. `delivery_fee` is the
    /// zone fee supplied by the delivery collaborator.
    ApplyPromotion { promotion: Promotion, delivery_fee: i64 },
    RemovePromotion,
    Clear,
}

/// Applies one action and returns the resulting state, reading the wall
/// clock for promotion validity.
pub fn reduce(state: &CartState, action: CartAction) -> CartState {
    reduce_at(state, action, Utc::now())
}

/// Applies one action with the clock passed explicitly. Deterministic:
/// the same state, action and `now` always produce the same result.
pub fn reduce_at(state: &CartState, action: CartAction, now: DateTime<Utc>) -> CartState {
    match action {
        CartAction::Init(snapshot) => reconcile(snapshot, now),

        CartAction::AddItem {
            menu_item,
            size_option,
            add_ons,
        } => {
            // Дубликаты дополнений схлопываются до расчета цены, иначе
            // ключ и цена разойдутся (ключ уже дедуплицирует id).
            let add_ons = normalize_add_ons(add_ons);
            let key = line_key_for(&menu_item, size_option.as_ref(), &add_ons);
            let unit = unit_price(&menu_item, size_option.as_ref(), &add_ons);

            let mut items = state.items.clone();
            if let Some(line) = items.iter_mut().find(|l| l.key == key) {
                // Такой элемент уже есть — увеличиваем количество
                line.quantity += 1;
                line.total_price = line_total(line.quantity, unit);
            } else {
                // Новые позиции идут в начало списка
                items.insert(
                    0,
                    CartLine {
                        key,
                        menu_item,
                        quantity: 1,
                        size_option,
                        add_ons,
                        total_price: unit,
                    },
                );
            }
            recalc(items, state.applied_promotion.clone(), state.delivery_fee, now)
        }

        CartAction::IncrementByKey { key } => {
            let Some(idx) = state.items.iter().position(|l| l.key == key) else {
                return state.clone();
            };
            let mut items = state.items.clone();
            let line = &mut items[idx];
            let unit = unit_price(&line.menu_item, line.size_option.as_ref(), &line.add_ons);
            line.quantity += 1;
            line.total_price = line_total(line.quantity, unit);
            recalc(items, state.applied_promotion.clone(), state.delivery_fee, now)
        }

        CartAction::DecrementByKey { key } => {
            let Some(idx) = state.items.iter().position(|l| l.key == key) else {
                return state.clone();
            };
            let mut items = state.items.clone();
            if items[idx].quantity <= 1 {
                items.remove(idx);
            } else {
                let line = &mut items[idx];
                let unit = unit_price(&line.menu_item, line.size_option.as_ref(), &line.add_ons);
                line.quantity -= 1;
                line.total_price = line_total(line.quantity, unit);
            }
            recalc(items, state.applied_promotion.clone(), state.delivery_fee, now)
        }

        CartAction::RemoveByKey { key } => {
            let mut items = state.items.clone();
            items.retain(|l| l.key != key);
            recalc(items, state.applied_promotion.clone(), state.delivery_fee, now)
        }

        CartAction::ApplyPromotion {
            promotion,
            delivery_fee,
        } => recalc(state.items.clone(), Some(promotion), delivery_fee, now),

        CartAction::RemovePromotion => recalc(state.items.clone(), None, 0, now),

        CartAction::Clear => CartState::empty(),
    }
}

fn line_total(quantity: u32, unit: i64) -> i64 {
    i64::from(quantity) * unit
}

/// Sorts add-ons by id and drops duplicates, mirroring what `line_key`
/// does with the ids. Stored lines always hold the normalized set, so key
/// identity and pricing can never disagree.
fn normalize_add_ons(mut add_ons: Vec<AddOn>) -> Vec<AddOn> {
    add_ons.sort_by_key(|a| a.id);
    add_ons.dedup_by_key(|a| a.id);
    add_ons
}

/// Rebuilds the derived fields from the item list. `total` is always the
/// plain sum of line totals; the promotion (when present and valid) shapes
/// `discount`, `delivery_fee` and `final_total` on top of it.
fn recalc(
    items: Vec<CartLine>,
    applied_promotion: Option<Promotion>,
    delivery_fee: i64,
    now: DateTime<Utc>,
) -> CartState {
    let total: i64 = items.iter().map(|l| l.total_price).sum();

    let (discount, delivery_fee) = match &applied_promotion {
        Some(promotion) => promotions::calculate_discount(promotion, total, delivery_fee, now),
        None => (0, 0),
    };

    CartState {
        schema_version: SCHEMA_VERSION,
        items,
        total,
        discount,
        delivery_fee,
        final_total: total - discount + delivery_fee,
        applied_promotion,
    }
}

/// Reconciles a restored snapshot: add-on sets are normalized, keys and
/// prices are recomputed from the stored components, zero-quantity lines
/// are dropped, and duplicate keys (possible if an older build wrote
/// unsorted or duplicated add-ons) are collapsed. Stored totals are never
/// trusted.
fn reconcile(snapshot: CartState, now: DateTime<Utc>) -> CartState {
    let mut rebuilt: Vec<CartLine> = Vec::new();

    for mut line in snapshot.items {
        if line.quantity == 0 {
            continue;
        }
        line.add_ons = normalize_add_ons(line.add_ons);
        let key = line_key_for(&line.menu_item, line.size_option.as_ref(), &line.add_ons);
        let unit = unit_price(&line.menu_item, line.size_option.as_ref(), &line.add_ons);

        if let Some(existing) = rebuilt.iter_mut().find(|l| l.key == key) {
            existing.quantity += line.quantity;
            existing.total_price = line_total(existing.quantity, unit);
        } else {
            line.key = key;
            line.total_price = line_total(line.quantity, unit);
            rebuilt.push(line);
        }
    }

    recalc(rebuilt, snapshot.applied_promotion, snapshot.delivery_fee, now)
}
