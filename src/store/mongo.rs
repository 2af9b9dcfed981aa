//! MongoDB-backed tutorial store.
//!
//! Records live in the `tutorials` collection as
//! `{_id: ObjectId, title, description, published}`. Fields written by other
//! clients (a `_class` discriminator, for instance) are ignored on read.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{StoreError, TutorialStore};
use crate::tutorial::Tutorial;

const COLLECTION: &str = "tutorials";

#[derive(Debug, Serialize, Deserialize)]
struct TutorialDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    published: bool,
}

impl From<TutorialDocument> for Tutorial {
    fn from(doc: TutorialDocument) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()),
            title: doc.title,
            description: doc.description,
            published: doc.published,
        }
    }
}

impl TryFrom<Tutorial> for TutorialDocument {
    type Error = StoreError;

    fn try_from(tutorial: Tutorial) -> Result<Self, Self::Error> {
        let id = tutorial.id
            .map(|id| ObjectId::parse_str(&id).map_err(|_| StoreError::InvalidId(id)))
            .transpose()?;
        Ok(Self {
            id,
            title: tutorial.title,
            description: tutorial.description,
            published: tutorial.published,
        })
    }
}

/// Tutorial store over a MongoDB database.
#[derive(Clone, Debug)]
pub struct MongoTutorialStore {
    database: Database,
    collection: Collection<TutorialDocument>,
}

impl MongoTutorialStore {
    /// Creates a client for `uri` and binds to `database`.
    ///
    /// The driver connects lazily; call [`ping`](TutorialStore::ping) to
    /// verify the server is reachable.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::new(client.database(database)))
    }

    pub fn new(database: Database) -> Self {
        let collection = database.collection(COLLECTION);
        Self { database, collection }
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Tutorial>, StoreError> {
        debug!(%filter, "find tutorials");
        let docs: Vec<TutorialDocument> = self.collection.find(filter).await?.try_collect().await?;
        Ok(docs.into_iter().map(Tutorial::from).collect())
    }
}

#[async_trait]
impl TutorialStore for MongoTutorialStore {
    async fn find_all(&self) -> Result<Vec<Tutorial>, StoreError> {
        self.find_many(doc! {}).await
    }

    async fn find_by_title_containing(&self, text: &str) -> Result<Vec<Tutorial>, StoreError> {
        self.find_many(doc! { "title": { "$regex": regex::escape(text) } }).await
    }

    async fn find_by_published(&self, published: bool) -> Result<Vec<Tutorial>, StoreError> {
        self.find_many(doc! { "published": published }).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tutorial>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        debug!(%oid, "find tutorial by id");
        let found = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(found.map(Tutorial::from))
    }

    async fn save(&self, tutorial: Tutorial) -> Result<Tutorial, StoreError> {
        let mut document = TutorialDocument::try_from(tutorial)?;
        match document.id {
            Some(oid) => {
                debug!(%oid, "replace tutorial");
                self.collection
                    .replace_one(doc! { "_id": oid }, &document)
                    .upsert(true)
                    .await?;
            }
            None => {
                let inserted = self.collection.insert_one(&document).await?;
                let oid = inserted.inserted_id.as_object_id().ok_or_else(|| {
                    StoreError::InvalidDocument(format!(
                        "inserted id {} is not an ObjectId",
                        inserted.inserted_id
                    ))
                })?;
                debug!(%oid, "inserted tutorial");
                document.id = Some(oid);
            }
        }
        Ok(document.into())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(());
        };
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        debug!(%oid, deleted = result.deleted_count, "delete tutorial");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let result = self.collection.delete_many(doc! {}).await?;
        debug!(deleted = result.deleted_count, "delete all tutorials");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
