//! Diary invitation entity: a time-bounded offer of a role, addressed to an
//! email and redeemed via share code.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuaderno_core::types::id::{DiaryId, InvitationId, UserId};

use super::collaborator::CollaboratorRole;
use super::share_code::ShareCode;

/// The roles an invitation can grant.
///
/// Ownership cannot be granted by invitation, so this is deliberately a
/// two-variant enum rather than a validated [`CollaboratorRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitedRole {
    /// May write and delete entries.
    Editor,
    /// Read-only access.
    Viewer,
}

impl InvitedRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// Human-readable label used in invitation emails.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Editor => "Editor",
            Self::Viewer => "Visualizador",
        }
    }
}

impl fmt::Display for InvitedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<InvitedRole> for CollaboratorRole {
    fn from(role: InvitedRole) -> Self {
        match role {
            InvitedRole::Editor => CollaboratorRole::Editor,
            InvitedRole::Viewer => CollaboratorRole::Viewer,
        }
    }
}

/// Lifecycle status of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    /// Issued and redeemable.
    Pending,
    /// Redeemed; never queried again.
    Accepted,
    /// Declined by the invitee.
    Declined,
    /// Marked expired.
    Expired,
}

impl InvitationStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An invitation to collaborate on a shared diary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryInvitation {
    /// Unique invitation identifier.
    pub id: InvitationId,
    /// The diary being shared.
    pub diary_id: DiaryId,
    /// The address the invitation was sent to.
    pub invited_email: String,
    /// Share code copied from the diary at issue time.
    pub share_code: ShareCode,
    /// The role being granted.
    pub role: InvitedRole,
    /// Who issued the invitation.
    pub invited_by: UserId,
    /// Lifecycle status.
    pub status: InvitationStatus,
    /// When the invitation was issued.
    pub created_at: DateTime<Utc>,
    /// When the invitation stops being redeemable.
    pub expires_at: DateTime<Utc>,
}

impl DiaryInvitation {
    /// Whether the invitation is past its expiry at the given instant.
    ///
    /// The boundary is inclusive: an invitation whose `expires_at` equals
    /// `now` is already expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Document shape for issuing a new invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvitation {
    /// The diary being shared.
    pub diary_id: DiaryId,
    /// The address the invitation is sent to.
    pub invited_email: String,
    /// Share code copied from the diary.
    pub share_code: ShareCode,
    /// The role being granted.
    pub role: InvitedRole,
    /// Who issued the invitation.
    pub invited_by: UserId,
    /// Lifecycle status (pending at issue time).
    pub status: InvitationStatus,
    /// Issue timestamp.
    pub created_at: DateTime<Utc>,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invitation(expires_at: DateTime<Utc>) -> DiaryInvitation {
        DiaryInvitation {
            id: InvitationId::new(),
            diary_id: DiaryId::new(),
            invited_email: "b@example.com".to_string(),
            share_code: ShareCode::from("abcdefghijklmnopqrstuvwx"),
            role: InvitedRole::Editor,
            invited_by: UserId::new(),
            status: InvitationStatus::Pending,
            created_at: expires_at - Duration::days(7),
            expires_at,
        }
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        assert!(invitation(now).is_expired(now));
        assert!(invitation(now - Duration::seconds(1)).is_expired(now));
        assert!(!invitation(now + Duration::seconds(1)).is_expired(now));
    }

    #[test]
    fn test_invited_role_maps_into_collaborator_role() {
        assert_eq!(
            CollaboratorRole::from(InvitedRole::Editor),
            CollaboratorRole::Editor
        );
        assert_eq!(
            CollaboratorRole::from(InvitedRole::Viewer),
            CollaboratorRole::Viewer
        );
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(InvitedRole::Editor.display_label(), "Editor");
        assert_eq!(InvitedRole::Viewer.display_label(), "Visualizador");
    }
}
