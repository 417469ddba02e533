//! File-backed storage: one JSON object file mapping keys to blobs.
//!
//! `set` rewrites the whole file through a temp file + rename, so a crash
//! mid-write never leaves a half-written store behind.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use crate::storage::{KeyValueStorage, StorageError};

/// Key/value store persisted as a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<HashMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let payload =
            serde_json::to_string_pretty(map).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)
            .await
            .map_err(|source| StorageError::Write {
                path: tmp.clone(),
                source,
            })?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut map = self.read_map().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt store file would otherwise block every future write;
        // the next successful set replaces it wholesale.
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(StorageError::Corrupt { path, source }) => {
                warn!(path = %path.display(), error = %source, "Storage file is corrupt, rewriting it");
                HashMap::new()
            }
            Err(other) => return Err(other),
        };
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }
}
