//! Storage Module
//!
//! Persistence backends for cached values. A backend holds at most one value
//! per key and knows nothing about expiration.

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::StorageError;

pub use file::FileStorage;
pub use memory::InMemoryStorage;

// == Storage ==
/// Stores and retrieves values by key.
#[async_trait]
pub trait Storage<K, V>: Send + Sync {
    /// Persists `value` under `key`, overwriting any previous value.
    async fn store(&self, key: &K, value: V) -> Result<(), StorageError>;

    /// Returns whether a value is stored under `key`.
    async fn contains(&self, key: &K) -> Result<bool, StorageError>;

    /// Returns the value stored under `key`.
    ///
    /// Fails with [`StorageError::NotFound`] when nothing is stored.
    async fn get(&self, key: &K) -> Result<V, StorageError>;

    /// Deletes the value stored under `key`. Absent keys are ignored.
    async fn remove(&self, key: &K) -> Result<(), StorageError>;

    /// Deletes every stored value.
    async fn clear(&self) -> Result<(), StorageError>;
}
