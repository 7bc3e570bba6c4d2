//! Key-value preference storage used to remember the active theme.
//!
//! # Design
//! - Values are raw strings so the persisted theme stays readable by plain scripts.
//! - Callers decide how to treat failures; the theme switcher swallows them.

use std::collections::HashMap;

use crate::core::error::StorageError;

/// Synchronous string key-value storage.
pub trait PreferenceStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend is unavailable or rejects the read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend is unavailable or rejects the write.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for native tests and hosts without persistent storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    /// Empty, writable store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a single entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    /// Store that fails every operation, mirroring disabled browser storage.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            unavailable: true,
        }
    }

    /// Peek at a stored value without going through the trait.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() -> Result<(), StorageError> {
        let mut store = MemoryStore::new();
        assert_eq!(store.read("site-theme")?, None);
        store.write("site-theme", "dark")?;
        assert_eq!(store.read("site-theme")?.as_deref(), Some("dark"));
        assert_eq!(store.get("site-theme"), Some("dark"));
        Ok(())
    }

    #[test]
    fn unavailable_store_rejects_everything() {
        let mut store = MemoryStore::unavailable();
        assert_eq!(store.read("site-theme"), Err(StorageError::Unavailable));
        assert_eq!(
            store.write("site-theme", "dark"),
            Err(StorageError::Unavailable)
        );
        assert_eq!(store.get("site-theme"), None);
    }
}
