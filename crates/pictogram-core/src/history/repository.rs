//! Key-value storage port backing the history.

use crate::error::Result;

/// Storage key the serialized history lives under.
pub const HISTORY_STORAGE_KEY: &str = "icons";

/// An abstract string store for persisted client state.
///
/// Mirrors a browser-style key/value storage: every value is an opaque
/// string. The history service owns serialization.
#[async_trait::async_trait]
pub trait HistoryStorage: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: The stored value
    /// - `Ok(None)`: Nothing is stored under `key`
    /// - `Err(PictogramError)`: The store could not be read
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
