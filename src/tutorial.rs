//! The tutorial record and the payloads clients send for it.

use serde::{Deserialize, Serialize};

/// A persisted tutorial.
///
/// `id` is `None` only before the first [`save`](crate::store::TutorialStore::save);
/// every record returned by a store carries one.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tutorial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub published: bool,
}

impl Tutorial {
    /// A not-yet-stored, unpublished tutorial.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            published: false,
        }
    }
}

/// Body of `POST` and `PUT` requests.
///
/// Missing fields default and unknown fields (including `id`) are ignored.
/// `published` is only honoured on update.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TutorialPayload {
    pub title: String,
    pub description: String,
    pub published: bool,
}

impl TutorialPayload {
    /// The record to insert: caller-supplied text, never published.
    pub fn into_new(self) -> Tutorial {
        Tutorial::new(self.title, self.description)
    }

    /// Overwrites every mutable field of `existing`, keeping its id.
    pub fn apply_to(self, existing: Tutorial) -> Tutorial {
        Tutorial {
            id: existing.id,
            title: self.title,
            description: self.description,
            published: self.published,
        }
    }
}
