//! Settings store abstraction.
//!
//! The [`SettingsStore`] trait is the only seam between the state holders and
//! durable storage. State holders receive a `&mut dyn SettingsStore`, so tests
//! run against [`crate::storage::MemorySettingsStore`] without touching disk.

use crate::domain::error::Result;

/// Key-value boolean storage for per-book favorite flags.
///
/// # Implementations
///
/// - [`crate::storage::JsonSettingsStore`]: JSON file with atomic writes (default)
/// - [`crate::storage::MemorySettingsStore`]: in-memory map
///
/// # Examples
///
/// ```
/// use zbooks::storage::{MemorySettingsStore, SettingsStore};
///
/// let mut store = MemorySettingsStore::default();
/// assert!(!store.get("Dune"));
/// store.set("Dune", true)?;
/// assert!(store.get("Dune"));
/// # Ok::<(), zbooks::BookshelfError>(())
/// ```
pub trait SettingsStore {
    /// Returns the stored value for `key`, or `None` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn lookup(&self, key: &str) -> Result<Option<bool>>;

    /// Stores `value` under `key`, persisting before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. The backend's in-memory view may
    /// already reflect the new value.
    fn set(&mut self, key: &str, value: bool) -> Result<()>;

    /// Returns the stored value for `key`, defaulting to `false`.
    ///
    /// A missing key is never an error. Read failures are logged and also
    /// treated as `false`.
    fn get(&self, key: &str) -> bool {
        match self.lookup(key) {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "settings lookup failed, defaulting to false");
                false
            }
        }
    }
}
