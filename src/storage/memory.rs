//! In-memory storage for tests and ephemeral carts.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::storage::{KeyValueStorage, StorageError};

/// Key/value store backed by a plain map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. to simulate a previously persisted cart.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .write()
            .expect("memory storage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    /// Synchronous peek for assertions.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .expect("memory storage lock poisoned")
            .get(key)
            .cloned()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.snapshot(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.seed(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_absent_key_is_none() {
        let store = MemoryStorage::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = MemoryStorage::new();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn seed_is_visible_through_get() {
        let store = MemoryStorage::new();
        store.seed("k", "seeded");
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("seeded"));
    }
}
