use once_cell::sync::Lazy;
use std::env;

/// Configuration constants for the cart engine
///
/// Directory where persisted cart snapshots are kept
/// Read once at startup from CART_STORAGE_DIR environment variable
/// Default: cart_data (relative to the working directory)
pub static CART_STORAGE_DIR: Lazy<String> =
    Lazy::new(|| env::var("CART_STORAGE_DIR").unwrap_or_else(|_| "cart_data".to_string()));

/// Storage key under which the cart state blob is persisted
/// Read from CART_STORAGE_KEY environment variable
/// Default: cart_state_v1 (matches the Mini App localStorage key)
pub static CART_STORAGE_KEY: Lazy<String> =
    Lazy::new(|| env::var("CART_STORAGE_KEY").unwrap_or_else(|_| "cart_state_v1".to_string()));
