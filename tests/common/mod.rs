//! Shared test doubles for storage behavior.

#![allow(dead_code)]

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use gocart::{KeyValueStorage, MemoryStorage, StorageError};

/// Storage that can be switched into a failing mode at runtime.
///
/// Reads always succeed; writes fail while `failing` is set, which is how
/// tests observe best-effort persistence without touching the filesystem.
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    failing: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of writes that reached the inner store.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.inner.snapshot(key)
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.inner.seed(key, value);
    }
}

#[async_trait]
impl KeyValueStorage for FlakyStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                path: PathBuf::from("flaky"),
                source: io::Error::other("injected write failure"),
            });
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }
}
