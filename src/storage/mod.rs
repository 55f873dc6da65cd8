//! Storage layer for persisted favorite flags.
//!
//! # Modules
//!
//! - `backend`: [`SettingsStore`] trait
//! - `json`: JSON file implementation
//! - `memory`: in-memory implementation
//! - `models`: stored record type and [`FavoriteKey`] strategy

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::SettingsStore;
pub use json::JsonSettingsStore;
pub use memory::MemorySettingsStore;
pub use models::{FavoriteKey, FavoriteRecord};

use crate::infrastructure::paths;

/// Opens the favorites store in the plugin data directory.
///
/// Falls back to an in-memory store if the file cannot be opened, so a
/// missing or unreadable data directory degrades to non-persistent favorites
/// instead of disabling them.
#[must_use]
pub fn open_default() -> Box<dyn SettingsStore> {
    let path = paths::get_data_dir().join("favorites.json");
    match JsonSettingsStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "failed to open favorites store, using memory");
            Box::new(MemorySettingsStore::default())
        }
    }
}
