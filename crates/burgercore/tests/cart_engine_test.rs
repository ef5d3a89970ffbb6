//! Integration tests for the cart engine (pricing, aggregation, persistence)
//!
//! Run with: cargo test --test cart_engine_test

use burgercore::cart::{reduce, CartAction, CartSession, CartState};
use burgercore::menu::{AddOn, MenuItem, SizeOption};
use burgercore::storage::{JsonFileStore, StateStore};

fn menu_item(id: i64, name: &str, price: f64) -> MenuItem {
    MenuItem {
        id,
        name: name.to_string(),
        description: String::new(),
        price,
        category: 1,
        image: None,
        is_hit: false,
        is_new: false,
        is_active: true,
        size_options: vec![],
        add_on_options: vec![],
    }
}

fn size_option(id: i64, name: &str, modifier: f64) -> SizeOption {
    SizeOption {
        id,
        name: name.to_string(),
        price_modifier: modifier,
        description: None,
        is_active: true,
    }
}

fn add_on(id: i64, name: &str, price: f64) -> AddOn {
    AddOn {
        id,
        name: name.to_string(),
        price,
        is_active: true,
    }
}

// ============================================================================
// Storefront Scenario Tests
// ============================================================================

mod scenario_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_burger_large_cheese_scenario() {
        let burger = menu_item(1, "Babay Burger", 30000.0);
        let large = size_option(2, "Large", 5000.0);
        let cheese = add_on(10, "Cheese", 2000.0);

        // Add burger + Large + Cheese — one line at 37000.
        let state = reduce(
            &CartState::empty(),
            CartAction::AddItem {
                menu_item: burger.clone(),
                size_option: Some(large.clone()),
                add_ons: vec![cheese.clone()],
            },
        );
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].total_price, 37000);

        // The identical combination lands on the same line.
        let state = reduce(
            &state,
            CartAction::AddItem {
                menu_item: burger,
                size_option: Some(large),
                add_ons: vec![cheese],
            },
        );
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].quantity, 2);
        assert_eq!(state.items[0].total_price, 74000);
        assert_eq!(state.total, 74000);

        // Remove it — empty cart, zero totals.
        let key = state.items[0].key.clone();
        let state = reduce(&state, CartAction::RemoveByKey { key });
        assert!(state.items.is_empty());
        assert_eq!(state.total, 0);
        assert_eq!(state.final_total, 0);
    }

    #[test]
    fn test_add_on_pick_order_does_not_split_lines() {
        let shaurma = menu_item(2, "Shaurma", 25000.0);
        let cheese = add_on(10, "Cheese", 2000.0);
        let sauce = add_on(11, "Garlic sauce", 1500.0);

        let state = reduce(
            &CartState::empty(),
            CartAction::AddItem {
                menu_item: shaurma.clone(),
                size_option: None,
                add_ons: vec![cheese.clone(), sauce.clone()],
            },
        );
        let state = reduce(
            &state,
            CartAction::AddItem {
                menu_item: shaurma,
                size_option: None,
                add_ons: vec![sauce, cheese],
            },
        );

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].quantity, 2);
        assert_eq!(state.total, 2 * (25000 + 2000 + 1500));
    }

    #[test]
    fn test_menu_payload_straight_into_cart() {
        // A payload the way the backend actually serves it: decimal strings.
        let item: MenuItem = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Fries",
                "price": "12000.00",
                "category": 3,
                "add_on_options": [{"id": 21, "name": "Ketchup", "price": "1000.00", "is_active": true}]
            }"#,
        )
        .unwrap();
        let ketchup = item.add_on_options[0].clone();

        let state = reduce(
            &CartState::empty(),
            CartAction::AddItem {
                menu_item: item,
                size_option: None,
                add_ons: vec![ketchup],
            },
        );
        assert_eq!(state.total, 13000);
    }
}

// ============================================================================
// Total Invariant (randomized operation sequences)
// ============================================================================

mod invariant_tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// After any sequence of mutations, `total` must equal the sum of line
    /// totals, `final_total` must equal `total` (no promotion applied), and
    /// no two lines may share a key.
    fn assert_invariants(state: &CartState) {
        let derived: i64 = state.items.iter().map(|l| l.total_price).sum();
        assert_eq!(state.total, derived, "total must equal sum of line totals");
        assert_eq!(state.final_total, state.total);

        for line in &state.items {
            assert!(line.quantity >= 1, "zero-quantity lines must not persist");

            // The stored add-on list is a set, and the line total always
            // equals quantity × unit price recomputed from the stored
            // components.
            let mut ids: Vec<i64> = line.add_ons.iter().map(|a| a.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), line.add_ons.len(), "stored add-ons must be deduped");

            let unit = burgercore::cart::unit_price(&line.menu_item, line.size_option.as_ref(), &line.add_ons);
            assert_eq!(line.total_price, i64::from(line.quantity) * unit);
        }
        let mut keys: Vec<&str> = state.items.iter().map(|l| l.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), state.items.len(), "keys must be unique");
    }

    #[test]
    fn test_random_operation_sequences_hold_the_total_invariant() {
        let mut rng = StdRng::seed_from_u64(20260831);

        let items = [
            menu_item(1, "Burger", 30000.0),
            menu_item(2, "Shaurma", 25000.0),
            menu_item(3, "Fries", 12000.0),
        ];
        let sizes = [None, Some(size_option(1, "Small", -3000.0)), Some(size_option(2, "Large", 5000.0))];
        let add_ons = [add_on(10, "Cheese", 2000.0), add_on(11, "Sauce", 1500.0)];

        for _ in 0..200 {
            let mut state = CartState::empty();
            for _ in 0..40 {
                let action = match rng.gen_range(0..6) {
                    0 | 1 => {
                        let mut picked: Vec<AddOn> =
                            add_ons.iter().filter(|_| rng.gen_bool(0.5)).cloned().collect();
                        // Occasionally hand in a duplicated add-on; the
                        // engine must treat the list as a set.
                        if !picked.is_empty() && rng.gen_bool(0.2) {
                            picked.push(picked[0].clone());
                        }
                        CartAction::AddItem {
                            menu_item: items[rng.gen_range(0..items.len())].clone(),
                            size_option: sizes[rng.gen_range(0..sizes.len())].clone(),
                            add_ons: picked,
                        }
                    }
                    2 => CartAction::IncrementByKey { key: random_key(&state, &mut rng) },
                    3 => CartAction::DecrementByKey { key: random_key(&state, &mut rng) },
                    4 => CartAction::RemoveByKey { key: random_key(&state, &mut rng) },
                    _ => CartAction::Clear,
                };
                state = reduce(&state, action);
                assert_invariants(&state);
            }
        }
    }

    /// Picks an existing key most of the time, a bogus one occasionally —
    /// unknown keys must be exact no-ops.
    fn random_key(state: &CartState, rng: &mut StdRng) -> String {
        if !state.items.is_empty() && rng.gen_bool(0.8) {
            state.items[rng.gen_range(0..state.items.len())].key.clone()
        } else {
            "404|0|".to_string()
        }
    }
}

// ============================================================================
// Persistence Tests (file store, restart survival)
// ============================================================================

mod persistence_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_cart_survives_a_restart() {
        let dir = tempdir().unwrap();

        // Первая "сессия": наполняем корзину.
        {
            let store = JsonFileStore::new(dir.path());
            let mut session = CartSession::with_key(Box::new(store), "cart_state_v1");
            session.add_item(menu_item(1, "Burger", 30000.0), Some(size_option(2, "Large", 5000.0)), vec![]);
            session.add_item(menu_item(3, "Fries", 12000.0), None, vec![]);
            session.increment_by_key("3|0|");
            assert_eq!(session.state().total, 35000 + 24000);
        }

        // Вторая "сессия": восстанавливаемся из того же файла.
        let store = JsonFileStore::new(dir.path());
        let session = CartSession::restore_with_key(Box::new(store), "cart_state_v1");
        assert_eq!(session.state().items.len(), 2);
        assert_eq!(session.state().total, 59000);
        assert_eq!(session.item_count_for_menu_item(3), 2);
    }

    #[test]
    fn test_round_trip_preserves_state_exactly() {
        let state = reduce(
            &CartState::empty(),
            CartAction::AddItem {
                menu_item: menu_item(1, "Burger", 30000.0),
                size_option: Some(size_option(2, "Large", 5000.0)),
                add_ons: vec![add_on(10, "Cheese", 2000.0)],
            },
        );

        let raw = serde_json::to_string(&state).unwrap();
        let parsed: CartState = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_restore_reconciles_against_changed_prices() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        // Snapshot written by a previous session, when the burger cost
        // 30000. The stored line total reflects the old price.
        let old = reduce(
            &CartState::empty(),
            CartAction::AddItem {
                menu_item: menu_item(1, "Burger", 30000.0),
                size_option: None,
                add_ons: vec![],
            },
        );
        let mut stale = old.clone();
        stale.items[0].menu_item.price = 32000.0; // menu refresh bumped the price
        store.save("cart_state_v1", &serde_json::to_string(&stale).unwrap()).unwrap();

        let session = CartSession::restore_with_key(Box::new(JsonFileStore::new(dir.path())), "cart_state_v1");
        // Totals come from the recompute, not from the stored numbers.
        assert_eq!(session.state().items[0].total_price, 32000);
        assert_eq!(session.state().total, 32000);
    }

    #[test]
    fn test_garbage_file_falls_back_to_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save("cart_state_v1", "🍔🍔🍔 not json").unwrap();

        let session = CartSession::restore_with_key(Box::new(store), "cart_state_v1");
        assert!(session.state().is_empty());
    }
}
