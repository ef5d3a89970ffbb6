//! Persistence boundary: durable per-device key-value storage.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::AppResult;

/// Key-value store for serialized state blobs.
///
/// An explicitly injected collaborator instead of an ambient global: the
/// cart session receives a `Box<dyn StateStore>` and never touches the
/// filesystem (or anything else) directly. Values are opaque strings; the
/// session layer owns the JSON encoding.
pub trait StateStore: Send {
    /// Returns the stored value for `key`, or `None` if nothing was stored.
    fn load(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}
