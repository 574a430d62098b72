//! Document store
//!
//! Each cab is a JSON document at `cabs/<id>.json` in a [`StorageBackend`].
//! The unique index on registration numbers lives in memory and is rebuilt
//! from the backend on open. Every write holds the index lock for its whole
//! duration, so check-then-write on the index cannot interleave.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::StorageBackend;
use crate::types::{Cab, CabDraft, CabId, UpdatePolicy};
use crate::{Error, Result};

use super::CabStore;

const DOCUMENT_PREFIX: &str = "cabs/";
const DOCUMENT_SUFFIX: &str = ".json";

pub struct DocumentStore {
    storage: Arc<dyn StorageBackend>,
    policy: UpdatePolicy,

    /// Registration number -> owning cab
    registrations: RwLock<HashMap<String, CabId>>,
}

impl DocumentStore {
    /// Open a store over `storage`, indexing any cabs already present
    pub async fn open(storage: Arc<dyn StorageBackend>, policy: UpdatePolicy) -> Result<Self> {
        let mut registrations = HashMap::new();

        for cab in load_all(storage.as_ref()).await? {
            if let Some(existing) = registrations.insert(cab.registration_number.clone(), cab.id) {
                return Err(Error::internal(format!(
                    "cabs {} and {} share registration number '{}'",
                    existing, cab.id, cab.registration_number
                )));
            }
        }

        tracing::info!(
            cabs = registrations.len(),
            policy = ?policy,
            "Opened cab store"
        );

        Ok(Self {
            storage,
            policy,
            registrations: RwLock::new(registrations),
        })
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    async fn load(&self, id: &CabId) -> Result<Option<Cab>> {
        load(self.storage.as_ref(), &document_key(id)).await
    }

    async fn save(&self, cab: &Cab) -> Result<()> {
        let data = serde_json::to_vec(cab)?;
        self.storage
            .put(&document_key(&cab.id), Bytes::from(data))
            .await
    }
}

fn document_key(id: &CabId) -> String {
    format!("{}{}{}", DOCUMENT_PREFIX, id, DOCUMENT_SUFFIX)
}

async fn load(storage: &dyn StorageBackend, key: &str) -> Result<Option<Cab>> {
    match storage.get(key).await? {
        Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
        None => Ok(None),
    }
}

async fn load_all(storage: &dyn StorageBackend) -> Result<Vec<Cab>> {
    let mut cabs = Vec::new();

    for key in storage.list(DOCUMENT_PREFIX).await? {
        if !key.ends_with(DOCUMENT_SUFFIX) {
            continue;
        }
        // A concurrent delete may remove the document between list and get
        if let Some(cab) = load(storage, &key).await? {
            cabs.push(cab);
        }
    }

    Ok(cabs)
}

#[async_trait]
impl CabStore for DocumentStore {
    async fn find_all(&self) -> Result<Vec<Cab>> {
        load_all(self.storage.as_ref()).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Cab>> {
        let id: CabId = id.parse()?;
        self.load(&id).await
    }

    async fn create(&self, draft: CabDraft) -> Result<Cab> {
        let cab = draft.into_cab(CabId::new())?;

        let mut registrations = self.registrations.write().await;
        if registrations.contains_key(&cab.registration_number) {
            return Err(Error::Conflict(cab.registration_number));
        }

        self.save(&cab).await?;
        registrations.insert(cab.registration_number.clone(), cab.id);

        tracing::debug!(id = %cab.id, "Created cab");
        Ok(cab)
    }

    async fn update_by_id(&self, id: &str, draft: CabDraft) -> Result<Option<Cab>> {
        let id: CabId = id.parse()?;

        let mut registrations = self.registrations.write().await;
        let Some(current) = self.load(&id).await? else {
            return Ok(None);
        };

        let updated = self.policy.apply(&current, draft)?;
        if let Some(owner) = registrations.get(&updated.registration_number) {
            if *owner != id {
                return Err(Error::Conflict(updated.registration_number));
            }
        }

        self.save(&updated).await?;
        if current.registration_number != updated.registration_number {
            registrations.remove(&current.registration_number);
            registrations.insert(updated.registration_number.clone(), id);
        }

        tracing::debug!(id = %id, "Updated cab");
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Cab>> {
        let id: CabId = id.parse()?;

        let mut registrations = self.registrations.write().await;
        let Some(current) = self.load(&id).await? else {
            return Ok(None);
        };

        if !self.storage.delete(&document_key(&id)).await? {
            return Ok(None);
        }
        registrations.remove(&current.registration_number);

        tracing::debug!(id = %id, "Deleted cab");
        Ok(Some(current))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.registrations.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::local::LocalStorage;
    use crate::storage::memory::MemoryStorage;
    use tempfile::TempDir;

    async fn memory_store(policy: UpdatePolicy) -> DocumentStore {
        DocumentStore::open(Arc::new(MemoryStorage::new()), policy)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = memory_store(UpdatePolicy::Replace).await;

        let cab = store
            .create(CabDraft::new("KA01AB1234", "Sedan", "White"))
            .await
            .unwrap();
        assert_eq!(cab.registration_number, "KA01AB1234");

        let found = store.find_by_id(&cab.id.to_string()).await.unwrap();
        assert_eq!(found, Some(cab.clone()));
        assert_eq!(store.find_all().await.unwrap(), vec![cab]);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let store = memory_store(UpdatePolicy::Replace).await;

        store
            .create(CabDraft::new("KA01AB1234", "Sedan", "White"))
            .await
            .unwrap();
        let err = store
            .create(CabDraft::new("KA01AB1234", "Hatch", "Red"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids() {
        let store = memory_store(UpdatePolicy::Replace).await;
        let unknown = CabId::new().to_string();

        assert!(store.find_by_id(&unknown).await.unwrap().is_none());
        assert!(store
            .update_by_id(&unknown, CabDraft::default())
            .await
            .unwrap()
            .is_none());
        assert!(store.delete_by_id(&unknown).await.unwrap().is_none());

        assert!(matches!(
            store.find_by_id("42").await,
            Err(Error::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn test_update_cannot_steal_registration() {
        let store = memory_store(UpdatePolicy::Merge).await;

        store
            .create(CabDraft::new("KA01", "Sedan", "White"))
            .await
            .unwrap();
        let second = store
            .create(CabDraft::new("KA02", "Hatch", "Red"))
            .await
            .unwrap();

        let steal = CabDraft {
            registration_number: Some("KA01".to_string()),
            ..CabDraft::default()
        };
        let err = store
            .update_by_id(&second.id.to_string(), steal)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_releases_old_registration() {
        let store = memory_store(UpdatePolicy::Merge).await;

        let cab = store
            .create(CabDraft::new("KA01", "Sedan", "White"))
            .await
            .unwrap();
        let rename = CabDraft {
            registration_number: Some("KA09".to_string()),
            ..CabDraft::default()
        };
        store
            .update_by_id(&cab.id.to_string(), rename)
            .await
            .unwrap()
            .unwrap();

        // The old number is free again
        store
            .create(CabDraft::new("KA01", "Hatch", "Red"))
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_releases_registration() {
        let store = memory_store(UpdatePolicy::Replace).await;

        let cab = store
            .create(CabDraft::new("KA01", "Sedan", "White"))
            .await
            .unwrap();
        let removed = store.delete_by_id(&cab.id.to_string()).await.unwrap();
        assert_eq!(removed, Some(cab.clone()));
        assert!(store
            .find_by_id(&cab.id.to_string())
            .await
            .unwrap()
            .is_none());

        store
            .create(CabDraft::new("KA01", "Sedan", "White"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reopen_rebuilds_index() {
        let temp_dir = TempDir::new().unwrap();
        let storage: Arc<dyn StorageBackend> = Arc::new(LocalStorage::new(temp_dir.path()).unwrap());

        let cab = {
            let store = DocumentStore::open(storage.clone(), UpdatePolicy::Replace)
                .await
                .unwrap();
            store
                .create(CabDraft::new("KA01", "Sedan", "White"))
                .await
                .unwrap()
        };

        let store = DocumentStore::open(storage, UpdatePolicy::Replace)
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(
            store.find_by_id(&cab.id.to_string()).await.unwrap(),
            Some(cab)
        );
        assert!(matches!(
            store.create(CabDraft::new("KA01", "Hatch", "Red")).await,
            Err(Error::Conflict(_))
        ));
    }
}
