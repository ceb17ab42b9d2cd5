//! Diary collaborator repository.

use std::sync::Arc;

use cuaderno_core::result::AppResult;
use cuaderno_core::traits::records::RecordStore;
use cuaderno_core::types::id::{DiaryId, UserId};
use cuaderno_core::types::predicate::Predicate;
use cuaderno_entity::diary::{CollaboratorStatus, DiaryCollaborator, NewCollaborator};

use super::{create_document, decode_all};

/// The collection collaborator rows live in.
const COLLECTION: &str = "diary_collaborators";

/// Repository for collaborator documents.
#[derive(Debug, Clone)]
pub struct CollaboratorRepository {
    store: Arc<dyn RecordStore>,
}

impl CollaboratorRepository {
    /// Create a new collaborator repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Persist a new collaborator row and return it with its assigned id.
    pub async fn create(&self, new: &NewCollaborator) -> AppResult<DiaryCollaborator> {
        create_document(self.store.as_ref(), COLLECTION, new).await
    }

    /// All active collaborator rows of a diary.
    pub async fn active_for_diary(&self, diary_id: DiaryId) -> AppResult<Vec<DiaryCollaborator>> {
        let predicates = vec![
            Predicate::eq("diary_id", diary_id)?,
            Predicate::eq("status", CollaboratorStatus::Active)?,
        ];
        let records = self.store.query(COLLECTION, &predicates).await?;
        decode_all(records)
    }

    /// All active collaborator rows held by a user, across diaries.
    pub async fn active_for_user(&self, user_id: UserId) -> AppResult<Vec<DiaryCollaborator>> {
        let predicates = vec![
            Predicate::eq("user_id", user_id)?,
            Predicate::eq("status", CollaboratorStatus::Active)?,
        ];
        let records = self.store.query(COLLECTION, &predicates).await?;
        decode_all(records)
    }
}
