//! Shared diary repository.

use std::sync::Arc;

use cuaderno_core::result::AppResult;
use cuaderno_core::traits::records::RecordStore;
use cuaderno_core::types::id::{DiaryId, UserId};
use cuaderno_core::types::predicate::Predicate;
use cuaderno_entity::diary::{NewSharedDiary, ShareCode, SharedDiary};

use super::{create_document, decode_all};

/// The collection shared diaries live in.
const COLLECTION: &str = "shared_diaries";

/// Repository for shared diary documents.
#[derive(Debug, Clone)]
pub struct DiaryRepository {
    store: Arc<dyn RecordStore>,
}

impl DiaryRepository {
    /// Create a new diary repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Persist a new shared diary and return it with its assigned id.
    pub async fn create(&self, new: &NewSharedDiary) -> AppResult<SharedDiary> {
        create_document(self.store.as_ref(), COLLECTION, new).await
    }

    /// Fetch a diary by id.
    pub async fn find_by_id(&self, id: DiaryId) -> AppResult<Option<SharedDiary>> {
        match self.store.find_by_id(COLLECTION, id.into_uuid()).await? {
            Some(record) => Ok(Some(record.decode()?)),
            None => Ok(None),
        }
    }

    /// Fetch a diary by its share code.
    ///
    /// Share codes are generated to be globally unique; if several diaries
    /// ever carried the same code, any one of them is returned.
    pub async fn find_by_share_code(&self, code: &ShareCode) -> AppResult<Option<SharedDiary>> {
        let predicates = vec![Predicate::eq("share_code", code)?];
        let records = self.store.query(COLLECTION, &predicates).await?;
        match records.into_iter().next() {
            Some(record) => Ok(Some(record.decode()?)),
            None => Ok(None),
        }
    }

    /// All diaries owned by the user.
    pub async fn find_by_owner(&self, owner_id: UserId) -> AppResult<Vec<SharedDiary>> {
        let predicates = vec![Predicate::eq("owner_id", owner_id)?];
        let records = self.store.query(COLLECTION, &predicates).await?;
        decode_all(records)
    }
}
