//! Shared diary entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuaderno_core::types::id::{DiaryId, UserId};

use super::share_code::ShareCode;

/// A diary shared between collaborators.
///
/// Diaries are never structurally deleted; revoking access happens at the
/// collaborator level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedDiary {
    /// Unique diary identifier.
    pub id: DiaryId,
    /// The user who created the diary and owns it.
    pub owner_id: UserId,
    /// Random token used for lookups and invitation redemption.
    pub share_code: ShareCode,
    /// Diary title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the diary is public. Persisted but gates nothing today.
    pub is_public: bool,
    /// When the diary was created.
    pub created_at: DateTime<Utc>,
    /// When the diary was last modified.
    pub last_modified_at: DateTime<Utc>,
    /// Who last modified the diary.
    pub last_modified_by: UserId,
}

/// Document shape for creating a new shared diary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSharedDiary {
    /// The user who owns the diary.
    pub owner_id: UserId,
    /// Random token used for lookups and invitation redemption.
    pub share_code: ShareCode,
    /// Diary title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the diary is public.
    pub is_public: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub last_modified_at: DateTime<Utc>,
    /// Who last modified the diary.
    pub last_modified_by: UserId,
}
