//! Diary entry entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use cuaderno_core::types::id::{DiaryId, EntryId, UserId};

/// Where an entry lives: the owner's personal diary, or a shared diary.
///
/// Resolved once at creation time. A `Personal` entry is private to its
/// owner; a `Shared` entry is visible to every active collaborator of the
/// diary regardless of who wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "diary_id", rename_all = "snake_case")]
pub enum EntryScope {
    /// The implicit default scope: the author's own diary.
    Personal,
    /// The entry belongs to a shared diary.
    Shared(DiaryId),
}

impl EntryScope {
    /// The shared diary id, when the scope is shared.
    pub fn diary_id(&self) -> Option<DiaryId> {
        match self {
            Self::Personal => None,
            Self::Shared(diary_id) => Some(*diary_id),
        }
    }

    /// Whether the entry lives in the author's personal diary.
    pub fn is_personal(&self) -> bool {
        matches!(self, Self::Personal)
    }
}

/// A single diary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Unique entry identifier.
    pub id: EntryId,
    /// Entry title.
    pub title: String,
    /// Entry body text.
    pub content: String,
    /// The calendar date the entry is about. Listings sort on this field,
    /// not on `created_at`.
    pub date: NaiveDate,
    /// Optional song label shown with the entry (doubles as a mood).
    pub song: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// URLs of photos already uploaded to object storage.
    #[serde(default)]
    pub photos: Vec<String>,
    /// Personal or shared scope, flattened into the document so queries can
    /// filter on `scope` and `diary_id` directly.
    #[serde(flatten)]
    pub scope: EntryScope,
    /// The user the entry belongs to.
    pub owner: UserId,
    /// The user who created the entry. Immutable.
    pub created_by: UserId,
    /// The user who last modified the entry.
    pub last_modified_by: UserId,
    /// When the entry document was created.
    pub created_at: DateTime<Utc>,
    /// When the entry document was last written.
    pub updated_at: DateTime<Utc>,
}

/// Document shape for creating a new entry: everything but the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntry {
    /// Entry title.
    pub title: String,
    /// Entry body text.
    pub content: String,
    /// The calendar date the entry is about.
    pub date: NaiveDate,
    /// Optional song label.
    pub song: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// URLs of photos already uploaded to object storage.
    #[serde(default)]
    pub photos: Vec<String>,
    /// Personal or shared scope.
    #[serde(flatten)]
    pub scope: EntryScope,
    /// The user the entry belongs to.
    pub owner: UserId,
    /// The user creating the entry.
    pub created_by: UserId,
    /// The user last modifying the entry (the creator, at creation).
    pub last_modified_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-write timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scope_flattens_into_document() {
        let diary_id = DiaryId::new();
        let value = serde_json::to_value(EntryScope::Shared(diary_id)).unwrap();
        assert_eq!(
            value,
            json!({"scope": "shared", "diary_id": diary_id.to_string()})
        );

        let value = serde_json::to_value(EntryScope::Personal).unwrap();
        assert_eq!(value, json!({"scope": "personal"}));
    }

    #[test]
    fn test_scope_accessors() {
        let diary_id = DiaryId::new();
        assert!(EntryScope::Personal.is_personal());
        assert_eq!(EntryScope::Personal.diary_id(), None);
        assert_eq!(EntryScope::Shared(diary_id).diary_id(), Some(diary_id));
    }
}
