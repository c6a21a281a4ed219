//! Persistence backends.
//!
//! The whole tree lives under a single string key. Hosts provide a
//! [`KeyValueStore`]; the browser build backs it with `localStorage`, tests
//! and native hosts use [`MemoryStore`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// A durable string-keyed store.
pub trait KeyValueStore {
    /// Read an entry. `Ok(None)` means the key has never been written.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write an entry, replacing any previous value.
    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete an entry. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).store(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    /// Number of successful writes (for tests)
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.into(), value.into());
        Self { entries, writes: 0 }
    }

    /// Raw access to an entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// How many times `store` has been called successfully.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(String::from(key), String::from(value));
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage usage statistics for a subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUsage {
    /// Total content bytes
    pub used_bytes: u64,

    /// Number of files
    pub file_count: u64,

    /// Number of directories (including the subtree root)
    pub directory_count: u64,
}

impl StorageUsage {
    /// Create new empty usage stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the usage stats.
    pub fn add_file(&mut self, size: u64) {
        self.file_count += 1;
        self.used_bytes += size;
    }

    /// Add a directory to the usage stats.
    pub fn add_directory(&mut self) {
        self.directory_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_usage() {
        let mut usage = StorageUsage::new();

        usage.add_file(1000);
        usage.add_file(500);
        usage.add_directory();

        assert_eq!(usage.file_count, 2);
        assert_eq!(usage.used_bytes, 1500);
        assert_eq!(usage.directory_count, 1);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("k").unwrap(), None);

        store.store("k", "v1").unwrap();
        store.store("k", "v2").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.write_count(), 2);

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::with_entry("a", "1"));
        assert_eq!(store.load("a").unwrap().as_deref(), Some("1"));
        store.store("b", "2").unwrap();
        assert_eq!(store.load("b").unwrap().as_deref(), Some("2"));
    }
}
