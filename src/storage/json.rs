//! JSON file-based settings store.
//!
//! Keeps the whole favorites map in memory and rewrites the file on every
//! change using write-to-temp + rename, so a crash never leaves a torn file.

use crate::domain::error::{BookshelfError, Result};
use crate::storage::backend::SettingsStore;
use crate::storage::models::FavoriteRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
///
/// ```json
/// {
///   "version": 1,
///   "favorites": {
///     "Dune": { "value": true, "updated_at": 1693400000 }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsData {
    version: u32,

    #[serde(default)]
    favorites: BTreeMap<String, FavoriteRecord>,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            version: 1,
            favorites: BTreeMap::new(),
        }
    }
}

/// JSON file settings store.
///
/// Not `Sync`; owned by the plugin thread.
#[derive(Debug)]
pub struct JsonSettingsStore {
    file_path: PathBuf,
    data: SettingsData,
    dirty: bool,
}

impl JsonSettingsStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file starts an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the file
    /// exists but cannot be read or parsed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zbooks::storage::{JsonSettingsStore, SettingsStore};
    ///
    /// let mut store = JsonSettingsStore::open("/tmp/zbooks/favorites.json")?;
    /// store.set("Dune", true)?;
    /// # Ok::<(), zbooks::BookshelfError>(())
    /// ```
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening settings store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no settings file yet, starting empty");
            SettingsData::default()
        };

        tracing::debug!(favorite_count = data.favorites.len(), "settings store ready");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<SettingsData> {
        let contents = std::fs::read_to_string(path)?;
        let data: SettingsData = serde_json::from_str(&contents)
            .map_err(|e| BookshelfError::Storage(format!("failed to parse settings JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            favorites = data.favorites.len(),
            "loaded settings data"
        );

        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| BookshelfError::Storage(format!("failed to serialize settings: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "settings saved");
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn lookup(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.data.favorites.get(key).map(|record| record.value))
    }

    fn set(&mut self, key: &str, value: bool) -> Result<()> {
        let _span = tracing::debug_span!("json_set_favorite", key = %key, value = value).entered();

        self.data
            .favorites
            .insert(key.to_string(), FavoriteRecord::now(value));
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonSettingsStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty settings on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save settings on drop");
            }
        }
    }
}
