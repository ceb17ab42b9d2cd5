//! Diary invitation repository.

use std::sync::Arc;

use serde_json::json;

use cuaderno_core::result::AppResult;
use cuaderno_core::traits::records::RecordStore;
use cuaderno_core::types::id::InvitationId;
use cuaderno_core::types::predicate::Predicate;
use cuaderno_entity::diary::{DiaryInvitation, InvitationStatus, NewInvitation, ShareCode};

use super::{create_document, decode_all};

/// The collection invitations live in.
const COLLECTION: &str = "diary_invitations";

/// Repository for invitation documents.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    store: Arc<dyn RecordStore>,
}

impl InvitationRepository {
    /// Create a new invitation repository.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Persist a new invitation and return it with its assigned id.
    pub async fn create(&self, new: &NewInvitation) -> AppResult<DiaryInvitation> {
        create_document(self.store.as_ref(), COLLECTION, new).await
    }

    /// All still-pending invitations carrying the given share code.
    ///
    /// Accepted, declined, and expired invitations never match, which is
    /// what makes redeeming the same code twice fail cleanly.
    pub async fn pending_for_share_code(
        &self,
        code: &ShareCode,
    ) -> AppResult<Vec<DiaryInvitation>> {
        let predicates = vec![
            Predicate::eq("share_code", code)?,
            Predicate::eq("status", InvitationStatus::Pending)?,
        ];
        let records = self.store.query(COLLECTION, &predicates).await?;
        decode_all(records)
    }

    /// Flip an invitation to the given status.
    pub async fn set_status(&self, id: InvitationId, status: InvitationStatus) -> AppResult<()> {
        self.store
            .update(COLLECTION, id.into_uuid(), json!({"status": status}))
            .await
    }
}
