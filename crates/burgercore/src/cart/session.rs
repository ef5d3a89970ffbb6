//! Сессия корзины: состояние + устойчивое хранилище.
//!
//! Все мутации проходят через единственную точку `dispatch`: редьюсер
//! полностью применяет действие (включая пересчет итогов), после чего
//! снапшот синхронно сохраняется в хранилище. Ошибки персистентности
//! логируются и не ломают мутацию — корзина продолжает жить в памяти.

use crate::cart::reducer::{reduce, CartAction};
use crate::cart::state::{CartLine, CartState, SCHEMA_VERSION};
use crate::config;
use crate::error::AppResult;
use crate::menu::{AddOn, MenuItem, Promotion, SizeOption};
use crate::storage::StateStore;

/// Живая корзина одного устройства.
pub struct CartSession {
    state: CartState,
    store: Box<dyn StateStore>,
    storage_key: String,
}

impl CartSession {
    /// Пустая корзина с ключом из конфигурации (CART_STORAGE_KEY).
    pub fn new(store: Box<dyn StateStore>) -> Self {
        CartSession::with_key(store, config::CART_STORAGE_KEY.as_str())
    }

    /// Пустая корзина с явным ключом хранения.
    pub fn with_key(store: Box<dyn StateStore>, storage_key: impl Into<String>) -> Self {
        CartSession {
            state: CartState::empty(),
            store,
            storage_key: storage_key.into(),
        }
    }

    /// Восстанавливает корзину из хранилища (ключ из конфигурации).
    ///
    /// Битый или отсутствующий снапшот никогда не является ошибкой:
    /// он отбрасывается с предупреждением в лог, и сессия стартует пустой.
    pub fn restore(store: Box<dyn StateStore>) -> Self {
        CartSession::restore_with_key(store, config::CART_STORAGE_KEY.as_str())
    }

    /// Восстанавливает корзину из хранилища под явным ключом.
    pub fn restore_with_key(store: Box<dyn StateStore>, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let state = hydrate(store.as_ref(), &storage_key);
        CartSession {
            state,
            store,
            storage_key,
        }
    }

    /// Текущее состояние (только чтение; мутации — через `dispatch`).
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Применяет действие и синхронно сохраняет результат.
    pub fn dispatch(&mut self, action: CartAction) -> &CartState {
        self.state = reduce(&self.state, action);
        log::debug!(
            "🛒 Cart updated: {} lines, total={}, final_total={}",
            self.state.items.len(),
            self.state.total,
            self.state.final_total
        );
        self.persist();
        &self.state
    }

    // Обертки, повторяющие API контекста Mini App.

    pub fn add_item(&mut self, menu_item: MenuItem, size_option: Option<SizeOption>, add_ons: Vec<AddOn>) {
        self.dispatch(CartAction::AddItem {
            menu_item,
            size_option,
            add_ons,
        });
    }

    pub fn increment_by_key(&mut self, key: &str) {
        self.dispatch(CartAction::IncrementByKey { key: key.to_string() });
    }

    pub fn decrement_by_key(&mut self, key: &str) {
        self.dispatch(CartAction::DecrementByKey { key: key.to_string() });
    }

    pub fn remove_by_key(&mut self, key: &str) {
        self.dispatch(CartAction::RemoveByKey { key: key.to_string() });
    }

    pub fn apply_promotion(&mut self, promotion: Promotion, delivery_fee: i64) {
        self.dispatch(CartAction::ApplyPromotion {
            promotion,
            delivery_fee,
        });
    }

    pub fn remove_promotion(&mut self) {
        self.dispatch(CartAction::RemovePromotion);
    }

    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    pub fn item_by_key(&self, key: &str) -> Option<&CartLine> {
        self.state.line_by_key(key)
    }

    pub fn item_count_for_menu_item(&self, menu_item_id: i64) -> u32 {
        self.state.count_for_menu_item(menu_item_id)
    }

    /// Сохраняет текущее состояние. Ошибка записи не фатальна.
    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            log::warn!("Failed to persist cart under '{}': {e}", self.storage_key);
        }
    }

    fn try_persist(&self) -> AppResult<()> {
        let raw = encode_state(&self.state)?;
        self.store.save(&self.storage_key, &raw)
    }
}

/// Кодирует состояние для хранилища; сбой — это `AppError::Serialization`.
fn encode_state(state: &CartState) -> AppResult<String> {
    Ok(serde_json::to_string(state)?)
}

/// Декодирует снапшот из хранилища.
fn decode_state(raw: &str) -> AppResult<CartState> {
    Ok(serde_json::from_str(raw)?)
}

/// Загружает и валидирует снапшот; любой сбой превращается в пустую корзину.
fn hydrate(store: &dyn StateStore, storage_key: &str) -> CartState {
    let raw = match store.load(storage_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            log::debug!("🛒 No stored cart under '{storage_key}', starting empty");
            return CartState::empty();
        }
        Err(e) => {
            log::warn!("Failed to read stored cart under '{storage_key}': {e}");
            return CartState::empty();
        }
    };

    let snapshot = match decode_state(&raw) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::warn!("Failed to restore cart from storage: {e}");
            return CartState::empty();
        }
    };

    if snapshot.schema_version > SCHEMA_VERSION {
        log::warn!(
            "Stored cart has schema version {} (ours is {SCHEMA_VERSION}), discarding",
            snapshot.schema_version
        );
        return CartState::empty();
    }

    // Снапшот из прошлой сессии сверяется с текущими ценами.
    reduce(&CartState::empty(), CartAction::Init(snapshot))
}
