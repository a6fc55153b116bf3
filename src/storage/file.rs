//! Disk-backed storage: one JSON document per key inside a directory.

use std::io::{self, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tokio::{fs, task};
use tracing::{debug, warn};

use super::Storage;
use crate::error::StorageError;

const EXTENSION: &str = "json";

/// On-disk layout of a stored value. The key is kept next to the value so a
/// document can be matched against the key that asked for it.
#[derive(Serialize)]
struct Document<'a, V> {
    key: &'a str,
    value: &'a V,
}

#[derive(Deserialize)]
struct StoredDocument<V> {
    key: String,
    value: V,
}

#[derive(Deserialize)]
struct StoredKey {
    key: String,
}

// == File Storage ==
/// Stores each value as `<dir>/<sha256(key)>.json`.
///
/// File names have a fixed length whatever the key, and the key itself is
/// stored inside the document.
#[derive(Debug)]
pub struct FileStorage<V> {
    dir: PathBuf,
    _value: PhantomData<fn() -> V>,
}

impl<V> FileStorage<V> {
    // == Constructor ==
    /// Opens (creating if needed) the storage directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        debug!("File storage opened at {}", dir.display());

        Ok(Self {
            dir,
            _value: PhantomData,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(file_name(key))
    }

    /// Reads the raw document for `key`, `None` when no file exists.
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

fn file_name(key: &str) -> String {
    format!("{}.{}", hex::encode(Sha256::digest(key.as_bytes())), EXTENSION)
}

#[async_trait]
impl<V> Storage<String, V> for FileStorage<V>
where
    V: Serialize + DeserializeOwned + Send + Sync,
{
    async fn store(&self, key: &String, value: V) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let bytes = serde_json::to_vec(&Document { key, value: &value })?;
        let dir = self.dir.clone();

        // Each write gets its own temp file, renamed over the target when
        // complete, so readers and racing writers never see a partial document
        let written = task::spawn_blocking(move || -> io::Result<()> {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.persist(&path).map_err(|err| err.error)?;
            Ok(())
        })
        .await
        .map_err(io::Error::other)?;

        Ok(written?)
    }

    async fn contains(&self, key: &String) -> Result<bool, StorageError> {
        match self.read(key).await? {
            Some(bytes) => Ok(serde_json::from_slice::<StoredKey>(&bytes)?.key == *key),
            None => Ok(false),
        }
    }

    async fn get(&self, key: &String) -> Result<V, StorageError> {
        let bytes = self
            .read(key)
            .await?
            .ok_or_else(|| StorageError::NotFound(key.clone()))?;
        let document: StoredDocument<V> = serde_json::from_slice(&bytes)?;

        if document.key != *key {
            warn!(?key, stored = %document.key, "File name collision, ignoring stored value");
            return Err(StorageError::NotFound(key.clone()));
        }
        Ok(document.value)
    }

    async fn remove(&self, key: &String) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut removed = 0usize;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                fs::remove_file(&path).await?;
                removed += 1;
            }
        }

        debug!("File storage cleared: removed {} values", removed);
        Ok(())
    }
}
