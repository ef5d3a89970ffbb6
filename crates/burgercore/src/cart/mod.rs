//! Cart engine: deterministic pricing and identity-keyed aggregation.
//!
//! The engine is split the way the state flows:
//! - `key`: stable identity for an option combination
//! - `pricing`: money rounding and unit price composition
//! - `state`: the `CartState` value and its queries
//! - `reducer`: pure `(state, action) → state` mutation engine
//! - `session`: state + storage wiring, the single dispatch funnel

pub mod key;
pub mod pricing;
pub mod reducer;
pub mod session;
pub mod state;

pub use key::{line_key, line_key_for, NO_SIZE_SENTINEL};
pub use pricing::{round_money, unit_price};
pub use reducer::{reduce, reduce_at, CartAction};
pub use session::CartSession;
pub use state::{CartLine, CartState, SCHEMA_VERSION};
