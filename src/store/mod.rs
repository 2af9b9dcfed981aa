//! Tutorial persistence.
//!
//! [`TutorialStore`] is the only way handlers reach the database. Each method
//! is a single call against the backend with no cross-call coordination.
//! Two backends exist: [`MongoTutorialStore`] for deployments and
//! [`InMemoryTutorialStore`] for local runs and tests.

mod memory;
mod mongo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::tutorial::Tutorial;

pub use memory::InMemoryTutorialStore;
pub use mongo::MongoTutorialStore;

/// A store handle shared by every route.
pub type SharedStore = Arc<dyn TutorialStore>;

/// Errors raised by a store backend.
///
/// "Not found" is never an error: lookups return `Ok(None)` instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("invalid id `{0}`")]
    InvalidId(String),

    #[error("unexpected document: {0}")]
    InvalidDocument(String),

    #[error("store lock poisoned")]
    Poisoned,
}

#[async_trait]
pub trait TutorialStore: Send + Sync {
    /// Every record, in the backend's natural order.
    async fn find_all(&self) -> Result<Vec<Tutorial>, StoreError>;

    /// Records whose title contains `text`. Case-sensitive; `text` is matched
    /// literally.
    async fn find_by_title_containing(&self, text: &str) -> Result<Vec<Tutorial>, StoreError>;

    async fn find_by_published(&self, published: bool) -> Result<Vec<Tutorial>, StoreError>;

    /// `Ok(None)` when no record has this id, including ids the backend could
    /// never have issued.
    async fn find_by_id(&self, id: &str) -> Result<Option<Tutorial>, StoreError>;

    /// Inserts when `tutorial.id` is `None` (the store assigns one), otherwise
    /// overwrites the record with that id. Returns the stored record.
    async fn save(&self, tutorial: Tutorial) -> Result<Tutorial, StoreError>;

    /// Removing an id that does not exist is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    async fn delete_all(&self) -> Result<(), StoreError>;

    /// Cheap round-trip proving the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
