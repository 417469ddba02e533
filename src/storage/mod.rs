//! Asynchronous key/value storage for opaque string blobs.
//!
//! The cart persists its full snapshot under a single fixed key; this
//! layer knows nothing about cart semantics.

mod file;
mod memory;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur when touching the backing store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read storage file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file '{path}' is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Async key/value store over opaque string blobs.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Fetch the blob stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the blob stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
