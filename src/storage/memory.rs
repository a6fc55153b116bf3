//! In-memory storage backed by a `HashMap`.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::Storage;
use crate::error::StorageError;

// == In-Memory Storage ==
/// Keeps values in process memory.
#[derive(Debug)]
pub struct InMemoryStorage<K, V> {
    values: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryStorage<K, V> {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl<K, V> Default for InMemoryStorage<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K, V> Storage<K, V> for InMemoryStorage<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn store(&self, key: &K, value: V) -> Result<(), StorageError> {
        self.values.write().insert(key.clone(), value);
        Ok(())
    }

    async fn contains(&self, key: &K) -> Result<bool, StorageError> {
        Ok(self.values.read().contains_key(key))
    }

    async fn get(&self, key: &K) -> Result<V, StorageError> {
        self.values
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("{:?}", key)))
    }

    async fn remove(&self, key: &K) -> Result<(), StorageError> {
        self.values.write().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.values.write().clear();
        Ok(())
    }
}
