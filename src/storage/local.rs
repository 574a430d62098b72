//! Local filesystem storage backend

use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

use crate::Result;

use super::StorageBackend;

/// Local filesystem storage, one file per key
#[derive(Debug)]
pub struct LocalStorage {
    root_path: PathBuf,
}

impl LocalStorage {
    pub fn new(root_path: impl Into<PathBuf>) -> Result<Self> {
        let root_path = root_path.into();
        std::fs::create_dir_all(&root_path)?;
        Ok(Self { root_path })
    }

    fn resolve_path(&self, key: &str) -> PathBuf {
        self.root_path.join(key)
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let path = self.resolve_path(key);
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        let path = self.resolve_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Readers never observe a half-written document
        let staging = path.with_extension("partial");
        fs::write(&staging, &data).await?;
        fs::rename(&staging, &path).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let path = self.resolve_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.resolve_path(key);
        Ok(fs::try_exists(&path).await?)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix_path = self.resolve_path(prefix);
        let mut results = Vec::new();

        let mut entries = match fs::read_dir(&prefix_path).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(results),
            Err(err) => return Err(err.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if let Ok(relative) = path.strip_prefix(&self.root_path) {
                if let Some(s) = relative.to_str() {
                    results.push(s.replace('\\', "/"));
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path()).unwrap();

        let key = "cabs/first.json";
        let data = Bytes::from("hello world");

        storage.put(key, data.clone()).await.unwrap();
        assert!(storage.exists(key).await.unwrap());

        let retrieved = storage.get(key).await.unwrap();
        assert_eq!(retrieved, Some(data));

        assert_eq!(storage.list("cabs").await.unwrap(), vec![key.to_string()]);

        assert!(storage.delete(key).await.unwrap());
        assert!(!storage.exists(key).await.unwrap());
        assert!(storage.get(key).await.unwrap().is_none());
        assert!(!storage.delete(key).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_missing_prefix_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path()).unwrap();

        assert!(storage.list("cabs").await.unwrap().is_empty());
    }
}
