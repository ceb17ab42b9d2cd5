//! Diary collaborator entity and role/status enumerations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuaderno_core::AppError;
use cuaderno_core::types::id::{CollaboratorId, DiaryId, UserId};

/// Standing role of a collaborator on a shared diary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorRole {
    /// The diary's creator. Exactly one per diary.
    Owner,
    /// May write and delete entries.
    Editor,
    /// Read-only access.
    Viewer,
}

impl CollaboratorRole {
    /// Whether this role may write into the diary.
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Owner | Self::Editor)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for CollaboratorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CollaboratorRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(AppError::validation(format!(
                "Invalid collaborator role: '{s}'. Expected one of: owner, editor, viewer"
            ))),
        }
    }
}

/// Lifecycle status of a collaborator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorStatus {
    /// The collaborator currently has access.
    Active,
    /// Admission is underway but not effective.
    Pending,
    /// Access has been revoked.
    Removed,
}

impl CollaboratorStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Removed => "removed",
        }
    }
}

impl fmt::Display for CollaboratorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user with a standing role on a shared diary.
///
/// Conceptually one row per (diary, user) pair. The owner's row is created
/// together with the diary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryCollaborator {
    /// Unique row identifier.
    pub id: CollaboratorId,
    /// The diary this row grants access to.
    pub diary_id: DiaryId,
    /// The user granted access.
    pub user_id: UserId,
    /// Denormalized email for display.
    pub user_email: String,
    /// Denormalized display name.
    pub user_name: String,
    /// Granted role.
    pub role: CollaboratorRole,
    /// Who invited this collaborator (the owner for the owner's own row).
    pub invited_by: UserId,
    /// When the collaborator joined.
    pub joined_at: DateTime<Utc>,
    /// Last observed activity.
    pub last_active_at: DateTime<Utc>,
    /// Row lifecycle status.
    pub status: CollaboratorStatus,
}

/// Document shape for creating a collaborator row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCollaborator {
    /// The diary this row grants access to.
    pub diary_id: DiaryId,
    /// The user granted access.
    pub user_id: UserId,
    /// Denormalized email for display.
    pub user_email: String,
    /// Denormalized display name.
    pub user_name: String,
    /// Granted role.
    pub role: CollaboratorRole,
    /// Who invited this collaborator.
    pub invited_by: UserId,
    /// When the collaborator joined.
    pub joined_at: DateTime<Utc>,
    /// Last observed activity.
    pub last_active_at: DateTime<Utc>,
    /// Row lifecycle status.
    pub status: CollaboratorStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_edit_matrix() {
        assert!(CollaboratorRole::Owner.can_edit());
        assert!(CollaboratorRole::Editor.can_edit());
        assert!(!CollaboratorRole::Viewer.can_edit());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(
            "owner".parse::<CollaboratorRole>().unwrap(),
            CollaboratorRole::Owner
        );
        assert_eq!(
            "EDITOR".parse::<CollaboratorRole>().unwrap(),
            CollaboratorRole::Editor
        );
        assert!("admin".parse::<CollaboratorRole>().is_err());
    }

    #[test]
    fn test_status_serde_is_lowercase() {
        let json = serde_json::to_string(&CollaboratorStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
    }
}
