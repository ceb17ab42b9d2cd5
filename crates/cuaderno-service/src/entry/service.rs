//! Entry CRUD service.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use cuaderno_core::error::AppError;
use cuaderno_core::result::AppResult;
use cuaderno_core::traits::identity::{Identity, IdentityProvider};
use cuaderno_core::types::id::{DiaryId, EntryId, UserId};
use cuaderno_entity::entry::{DiaryEntry, EntryScope, NewEntry};
use cuaderno_records::EntryRepository;

use crate::collaboration::CollaborationService;

/// What the entry form hands over on save: the author-editable fields.
///
/// The scope is resolved once, from the diary context the form was opened
/// in. Everything else (owner, authorship, timestamps) is stamped by the
/// service.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EntryDraft {
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
    pub scope: EntryScope,
}

/// Owns every write to diary entries.
#[derive(Debug, Clone)]
pub struct EntryService {
    /// Entry repository.
    entries: Arc<EntryRepository>,
    /// Collaboration service for shared-diary edit checks.
    collaboration: Arc<CollaborationService>,
    /// Identity provider for the current caller.
    identity: Arc<dyn IdentityProvider>,
}

impl EntryService {
    /// Creates a new entry service.
    pub fn new(
        entries: Arc<EntryRepository>,
        collaboration: Arc<CollaborationService>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            entries,
            collaboration,
            identity,
        }
    }

    fn require_identity(&self) -> AppResult<Identity> {
        self.identity
            .current_identity()
            .ok_or_else(|| AppError::unauthenticated("No user is signed in"))
    }

    async fn require_edit_permission(&self, scope: EntryScope, user_id: UserId) -> AppResult<()> {
        if let EntryScope::Shared(diary_id) = scope {
            if !self.collaboration.can_edit(diary_id, user_id).await {
                return Err(AppError::forbidden(
                    "You do not have permission to write in this diary",
                ));
            }
        }
        Ok(())
    }

    /// Creates an entry from a draft, stamping ownership, authorship, and
    /// timestamps from the current user. A shared-scope draft requires the
    /// caller to hold an editing role on the diary.
    pub async fn create_entry(&self, draft: EntryDraft) -> AppResult<DiaryEntry> {
        let caller = self.require_identity()?;
        self.require_edit_permission(draft.scope, caller.user_id)
            .await?;

        let now = Utc::now();
        let entry = self
            .entries
            .create(&NewEntry {
                title: draft.title,
                content: draft.content,
                date: draft.date,
                song: draft.song,
                tags: draft.tags,
                photos: draft.photos,
                scope: draft.scope,
                owner: caller.user_id,
                created_by: caller.user_id,
                last_modified_by: caller.user_id,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(entry_id = %entry.id, user_id = %caller.user_id, "Entry created");
        Ok(entry)
    }

    /// Rewrites an existing entry from a draft.
    ///
    /// The stored scope is kept — an entry cannot move between diaries —
    /// and the draft's scope field is ignored. Shared entries re-check the
    /// caller's edit permission. Owner, creator, and creation time are
    /// immutable; only `last_modified_by` and `updated_at` are restamped.
    pub async fn update_entry(&self, entry_id: EntryId, draft: EntryDraft) -> AppResult<DiaryEntry> {
        let caller = self.require_identity()?;

        let mut entry = self
            .entries
            .find_by_id(entry_id)
            .await?
            .ok_or_else(|| AppError::not_found("Entry not found"))?;

        self.require_edit_permission(entry.scope, caller.user_id)
            .await?;

        entry.title = draft.title;
        entry.content = draft.content;
        entry.date = draft.date;
        entry.song = draft.song;
        entry.tags = draft.tags;
        entry.photos = draft.photos;
        entry.last_modified_by = caller.user_id;
        entry.updated_at = Utc::now();

        self.entries.update(&entry).await?;

        info!(entry_id = %entry.id, user_id = %caller.user_id, "Entry updated");
        Ok(entry)
    }

    /// The user's personal entries, newest entry date first.
    pub async fn personal_entries(&self, user_id: UserId) -> AppResult<Vec<DiaryEntry>> {
        self.entries.personal_for_user(user_id).await
    }

    /// A shared diary's entries, newest entry date first.
    pub async fn shared_entries(&self, diary_id: DiaryId) -> AppResult<Vec<DiaryEntry>> {
        self.entries.for_diary(diary_id).await
    }

    /// Hard-deletes an entry. No tombstone is kept, and no authorization is
    /// enforced here; callers check permissions before invoking.
    pub async fn delete_entry(&self, entry_id: EntryId) -> AppResult<()> {
        self.entries.delete(entry_id).await?;
        info!(entry_id = %entry_id, "Entry deleted");
        Ok(())
    }
}
