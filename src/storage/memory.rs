//! In-memory settings store.
//!
//! Used by tests and as the fallback when the data directory is unavailable;
//! favorites then last only as long as the plugin instance.

use crate::domain::error::Result;
use crate::storage::backend::SettingsStore;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    values: HashMap<String, bool>,
}

impl MemorySettingsStore {
    /// Number of keys ever written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn lookup(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: bool) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
