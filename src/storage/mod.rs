//! Storage abstraction layer
//!
//! Provides a unified key/value interface over memory and local filesystem storage

use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

pub mod local;
pub mod memory;

/// Storage backend trait
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read object from storage, `None` if the key is absent
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Write object to storage, replacing any previous value
    async fn put(&self, key: &str, data: Bytes) -> Result<()>;

    /// Delete object from storage, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Check if object exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// List object keys with prefix
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Memory,
    Local { root_path: String },
}

/// Create storage backend from config
pub fn create_storage(config: StorageConfig) -> Result<Box<dyn StorageBackend>> {
    match config {
        StorageConfig::Memory => Ok(Box::new(memory::MemoryStorage::new())),
        StorageConfig::Local { root_path } => {
            let backend = local::LocalStorage::new(root_path)?;
            Ok(Box::new(backend))
        }
    }
}
