//! Burgercore - cart engine for the StreetBurger Telegram Mini App
//!
//! This library provides the storefront core that does not depend on the
//! Telegram surface: menu data model, deterministic cart pricing and
//! identity-keyed aggregation, promotion discount math, and local
//! persistence of the cart state.
//!
//! # Module Structure
//!
//! - `cart`: line-item keys, pricing, the reducer and the persisted session
//! - `menu`: serde model of the menu API shapes (items, sizes, add-ons)
//! - `promotions`: promotion validity and discount computation
//! - `storage`: key-value persistence boundary (JSON file / in-memory)
//! - `config`: environment-driven configuration
//! - `error`: centralized error types

pub mod cart;
pub mod config;
pub mod error;
pub mod menu;
pub mod promotions;
pub mod storage;

// Re-export commonly used types for convenience
pub use cart::{reduce, CartAction, CartLine, CartSession, CartState};
pub use error::{AppError, AppResult};
pub use menu::{AddOn, MenuItem, Promotion, SizeOption};
pub use storage::{JsonFileStore, MemoryStore, StateStore};
