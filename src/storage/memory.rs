//! In-memory cart storage

use super::CartStorage;
use crate::error::{OrderError, Result};
use std::collections::HashMap;

/// In-memory storage for native hosts and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects every write (quota exceeded, private mode, ...)
    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            fail_writes: true,
        }
    }

    /// Seed raw bytes, bypassing any cart
    pub fn with_entry(mut self, key: &str, value: &[u8]) -> Self {
        self.entries.insert(key.to_string(), value.to_vec());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(OrderError::Storage(format!("write to '{}' rejected", key)));
        }
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("cart").unwrap(), None);

        storage.set("cart", b"[]").unwrap();
        assert_eq!(storage.get("cart").unwrap(), Some(b"[]".to_vec()));

        storage.remove("cart").unwrap();
        assert!(!storage.contains("cart"));
        // Removing again is fine
        storage.remove("cart").unwrap();
    }

    #[test]
    fn test_failing_storage() {
        let mut storage = MemoryStorage::failing();
        assert!(matches!(storage.set("cart", b"{}"), Err(OrderError::Storage(_))));
    }
}
