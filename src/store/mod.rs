//! Persistence gateway for cabs
//!
//! Handlers only talk to the [`CabStore`] trait. Identifiers arrive as the raw
//! strings a client sent; interpreting them is the store's job, so a malformed
//! id surfaces as [`Error::InvalidId`](crate::Error::InvalidId) rather than as
//! a missing record.

use async_trait::async_trait;

use crate::types::{Cab, CabDraft};
use crate::Result;

pub mod document;

pub use document::DocumentStore;

/// CRUD operations over stored cabs
#[async_trait]
pub trait CabStore: Send + Sync {
    /// Every stored cab, in storage order
    async fn find_all(&self) -> Result<Vec<Cab>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Cab>>;

    /// Assign an id and persist a new cab.
    ///
    /// Fails if a field is missing or the registration number is taken.
    async fn create(&self, draft: CabDraft) -> Result<Cab>;

    /// Apply `draft` to an existing cab and return the updated record
    async fn update_by_id(&self, id: &str, draft: CabDraft) -> Result<Option<Cab>>;

    /// Remove a cab, returning the record that was removed
    async fn delete_by_id(&self, id: &str) -> Result<Option<Cab>>;

    /// Number of stored cabs
    async fn count(&self) -> Result<usize>;
}
