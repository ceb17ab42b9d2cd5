//! Diary entry repository.

use std::sync::Arc;

use serde_json::Value;

use cuaderno_core::result::AppResult;
use cuaderno_core::traits::records::RecordStore;
use cuaderno_core::types::id::{DiaryId, EntryId, UserId};
use cuaderno_core::types::predicate::Predicate;
use cuaderno_entity::entry::{DiaryEntry, NewEntry};

use super::{create_document, decode_all};

/// The collection entries live in.
const COLLECTION: &str = "diary_entries";

/// Repository for diary entry documents.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    store: Arc<dyn RecordStore>,
}

impl EntryRepository {
    /// Create a new entry repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Persist a new entry and return it with its assigned id.
    pub async fn create(&self, new: &NewEntry) -> AppResult<DiaryEntry> {
        create_document(self.store.as_ref(), COLLECTION, new).await
    }

    /// Fetch an entry by id.
    pub async fn find_by_id(&self, id: EntryId) -> AppResult<Option<DiaryEntry>> {
        match self.store.find_by_id(COLLECTION, id.into_uuid()).await? {
            Some(record) => Ok(Some(record.decode()?)),
            None => Ok(None),
        }
    }

    /// All personal entries owned by the user, newest entry date first.
    pub async fn personal_for_user(&self, user_id: UserId) -> AppResult<Vec<DiaryEntry>> {
        let predicates = vec![
            Predicate::eq("owner", user_id)?,
            Predicate::eq("scope", "personal")?,
        ];
        let records = self.store.query(COLLECTION, &predicates).await?;
        let mut entries: Vec<DiaryEntry> = decode_all(records)?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    /// All entries of a shared diary, newest entry date first.
    ///
    /// Shared listings use the same ordering as personal ones; the store
    /// itself returns documents unordered.
    pub async fn for_diary(&self, diary_id: DiaryId) -> AppResult<Vec<DiaryEntry>> {
        let predicates = vec![Predicate::eq("diary_id", diary_id)?];
        let records = self.store.query(COLLECTION, &predicates).await?;
        let mut entries: Vec<DiaryEntry> = decode_all(records)?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    /// Overwrite an entry document with the given entity state.
    pub async fn update(&self, entry: &DiaryEntry) -> AppResult<()> {
        let mut doc = serde_json::to_value(entry)?;
        if let Value::Object(map) = &mut doc {
            map.remove("id");
        }
        self.store
            .update(COLLECTION, entry.id.into_uuid(), doc)
            .await
    }

    /// Hard-delete an entry. No tombstone is kept, and no authorization is
    /// enforced at this layer; callers check permissions first.
    pub async fn delete(&self, id: EntryId) -> AppResult<()> {
        self.store.delete(COLLECTION, id.into_uuid()).await
    }
}
