//! Process-local tutorial store.
//!
//! Thread-safe via `RwLock`; records keep insertion order. Ids are fresh
//! ObjectId hex strings so clients see the same id format as with MongoDB.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::{StoreError, TutorialStore};
use crate::tutorial::Tutorial;

#[derive(Clone, Debug, Default)]
pub struct InMemoryTutorialStore {
    tutorials: Arc<RwLock<Vec<Tutorial>>>,
}

impl InMemoryTutorialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Tutorial>>, StoreError> {
        self.tutorials.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Tutorial>>, StoreError> {
        self.tutorials.write().map_err(|_| StoreError::Poisoned)
    }

    fn filtered(&self, keep: impl Fn(&Tutorial) -> bool) -> Result<Vec<Tutorial>, StoreError> {
        Ok(self.read()?.iter().filter(|t| keep(t)).cloned().collect())
    }
}

#[async_trait]
impl TutorialStore for InMemoryTutorialStore {
    async fn find_all(&self) -> Result<Vec<Tutorial>, StoreError> {
        Ok(self.read()?.clone())
    }

    async fn find_by_title_containing(&self, text: &str) -> Result<Vec<Tutorial>, StoreError> {
        self.filtered(|t| t.title.contains(text))
    }

    async fn find_by_published(&self, published: bool) -> Result<Vec<Tutorial>, StoreError> {
        self.filtered(|t| t.published == published)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tutorial>, StoreError> {
        Ok(self.read()?.iter().find(|t| t.id.as_deref() == Some(id)).cloned())
    }

    async fn save(&self, mut tutorial: Tutorial) -> Result<Tutorial, StoreError> {
        let mut tutorials = self.write()?;
        let id = tutorial.id.get_or_insert_with(|| ObjectId::new().to_hex()).clone();
        match tutorials.iter_mut().find(|t| t.id.as_deref() == Some(id.as_str())) {
            Some(existing) => *existing = tutorial.clone(),
            None => tutorials.push(tutorial.clone()),
        }
        Ok(tutorial)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.write()?.retain(|t| t.id.as_deref() != Some(id));
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.write()?.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}
