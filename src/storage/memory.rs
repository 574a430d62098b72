//! In-memory storage backend

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use crate::Result;

use super::StorageBackend;

/// Process-local storage; contents are gone once it is dropped
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: DashMap<String, Bytes>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.objects.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        self.objects.insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.objects.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.objects.contains_key(key))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .objects
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect())
    }
}
