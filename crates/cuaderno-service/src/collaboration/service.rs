//! Collaboration service: shared diaries, collaborators, and invitations.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, Utc};
use futures::future::join_all;
use tracing::{info, warn};
use validator::ValidateEmail;

use cuaderno_core::config::{ApplicationConfig, InvitationConfig};
use cuaderno_core::error::{AppError, ErrorKind};
use cuaderno_core::result::AppResult;
use cuaderno_core::traits::email::{InvitationEmail, Mailer};
use cuaderno_core::traits::identity::{Identity, IdentityProvider};
use cuaderno_core::types::id::{DiaryId, UserId};
use cuaderno_entity::diary::{
    CollaboratorRole, CollaboratorStatus, DiaryCollaborator, DiaryInvitation, InvitationStatus,
    InvitedRole, NewCollaborator, NewInvitation, NewSharedDiary, ShareCode, SharedDiary,
};
use cuaderno_records::{CollaboratorRepository, DiaryRepository, InvitationRepository};

use super::codes::ShareCodeGenerator;

/// Owns every write to shared diaries, collaborator rows, and invitations,
/// and answers permission checks over them.
#[derive(Debug, Clone)]
pub struct CollaborationService {
    /// Shared diary repository.
    diaries: Arc<DiaryRepository>,
    /// Collaborator repository.
    collaborators: Arc<CollaboratorRepository>,
    /// Invitation repository.
    invitations: Arc<InvitationRepository>,
    /// Identity provider for the current caller.
    identity: Arc<dyn IdentityProvider>,
    /// Outbound mail, best-effort.
    mailer: Arc<dyn Mailer>,
    /// Share code generation.
    codes: ShareCodeGenerator,
    /// Application settings (public origin for invitation links).
    app_config: ApplicationConfig,
    /// Invitation lifecycle settings.
    invitation_config: InvitationConfig,
}

impl CollaborationService {
    /// Creates a new collaboration service.
    pub fn new(
        diaries: Arc<DiaryRepository>,
        collaborators: Arc<CollaboratorRepository>,
        invitations: Arc<InvitationRepository>,
        identity: Arc<dyn IdentityProvider>,
        mailer: Arc<dyn Mailer>,
        app_config: ApplicationConfig,
        invitation_config: InvitationConfig,
    ) -> Self {
        let codes = ShareCodeGenerator::from_config(&invitation_config);
        Self {
            diaries,
            collaborators,
            invitations,
            identity,
            mailer,
            codes,
            app_config,
            invitation_config,
        }
    }

    fn require_identity(&self) -> AppResult<Identity> {
        self.identity
            .current_identity()
            .ok_or_else(|| AppError::unauthenticated("No user is signed in"))
    }

    /// Creates a shared diary owned by the current user, together with the
    /// owner's collaborator row.
    ///
    /// The diary and the owner row are two store writes with no transaction
    /// across them; a crash in between leaves a diary without an owner row.
    /// The record-store capability offers nothing better, so the sequence is
    /// best-effort by contract.
    pub async fn create_shared_diary(
        &self,
        title: String,
        description: Option<String>,
    ) -> AppResult<SharedDiary> {
        let caller = self.require_identity()?;

        if title.trim().is_empty() {
            return Err(AppError::validation("Diary title must not be empty"));
        }

        let now = Utc::now();
        let diary = self
            .diaries
            .create(&NewSharedDiary {
                owner_id: caller.user_id,
                share_code: self.codes.generate(),
                title,
                description,
                is_public: false,
                created_at: now,
                last_modified_at: now,
                last_modified_by: caller.user_id,
            })
            .await?;

        self.add_collaborator(diary.id, &caller, CollaboratorRole::Owner, caller.user_id)
            .await?;

        info!(
            diary_id = %diary.id,
            owner_id = %caller.user_id,
            "Shared diary created"
        );

        Ok(diary)
    }

    /// Every diary the user can see: owned diaries plus diaries with an
    /// active collaborator row, deduplicated by diary id.
    ///
    /// The per-diary lookups for the collaborator half run concurrently; a
    /// failed lookup is logged and skipped, so a partial list is possible.
    pub async fn shared_diaries_for(&self, user_id: UserId) -> AppResult<Vec<SharedDiary>> {
        let owned = self.diaries.find_by_owner(user_id).await?;
        let rows = self.collaborators.active_for_user(user_id).await?;

        let lookups = rows.into_iter().map(|row| {
            let diaries = Arc::clone(&self.diaries);
            async move {
                match diaries.find_by_id(row.diary_id).await {
                    Ok(diary) => diary,
                    Err(err) => {
                        warn!(diary_id = %row.diary_id, error = %err, "Skipping failed diary lookup");
                        None
                    }
                }
            }
        });
        let collaborating = join_all(lookups).await;

        let mut seen = HashSet::new();
        let mut diaries = Vec::new();
        for diary in owned.into_iter().chain(collaborating.into_iter().flatten()) {
            if seen.insert(diary.id) {
                diaries.push(diary);
            }
        }
        Ok(diaries)
    }

    /// Point lookup by share code. `None` when absent.
    pub async fn diary_by_share_code(&self, code: &ShareCode) -> AppResult<Option<SharedDiary>> {
        self.diaries.find_by_share_code(code).await
    }

    /// Point lookup by id. `None` when absent.
    pub async fn diary_by_id(&self, diary_id: DiaryId) -> AppResult<Option<SharedDiary>> {
        self.diaries.find_by_id(diary_id).await
    }

    /// Invites an email address to collaborate on a diary.
    ///
    /// Only the diary owner may invite. The invitation is persisted first;
    /// the email about it is best-effort, and a send failure is logged
    /// without failing the operation — an invitation must never depend on a
    /// mail provider being up.
    pub async fn invite_collaborator(
        &self,
        diary_id: DiaryId,
        email: &str,
        role: InvitedRole,
    ) -> AppResult<DiaryInvitation> {
        let caller = self.require_identity()?;

        if !email.validate_email() {
            return Err(AppError::validation(format!(
                "'{email}' is not a valid email address"
            )));
        }

        let diary = self
            .diaries
            .find_by_id(diary_id)
            .await?
            .ok_or_else(|| AppError::not_found("Diary not found"))?;

        if diary.owner_id != caller.user_id {
            return Err(AppError::forbidden(
                "Only the diary owner can invite collaborators",
            ));
        }

        let now = Utc::now();
        let expires_at = now + Duration::days(self.invitation_config.expiry_days);

        let invitation = self
            .invitations
            .create(&NewInvitation {
                diary_id,
                invited_email: email.to_string(),
                share_code: diary.share_code.clone(),
                role,
                invited_by: caller.user_id,
                status: InvitationStatus::Pending,
                created_at: now,
                expires_at,
            })
            .await?;

        match self.invitation_link(&diary.share_code) {
            Ok(link) => {
                let payload = InvitationEmail {
                    to_email: email.to_string(),
                    diary_title: diary.title.clone(),
                    inviter_name: caller.short_name(),
                    invitation_link: link,
                    role_label: role.display_label().to_string(),
                    expires_on: expires_at.date_naive(),
                };
                if let Err(err) = self.mailer.send_invitation(&payload).await {
                    warn!(
                        to = %email,
                        error = %err,
                        "Invitation email failed to send; the invitation remains valid"
                    );
                }
            }
            Err(err) => {
                warn!(error = %err, "Could not build invitation link; email skipped");
            }
        }

        info!(
            diary_id = %diary_id,
            invitation_id = %invitation.id,
            role = %role,
            "Collaborator invited"
        );

        Ok(invitation)
    }

    /// Redeems an invitation by share code for the current user.
    ///
    /// Among several pending invitations for the same code, the most
    /// recently created one wins. The pending-only lookup is what makes a
    /// second redemption of the same code fail with `NotFound` instead of
    /// duplicating the collaborator row. The expiry boundary is inclusive:
    /// an invitation whose expiry equals the current instant is expired.
    pub async fn accept_invitation(&self, code: &ShareCode) -> AppResult<DiaryCollaborator> {
        let caller = self.require_identity()?;

        let mut pending = self.invitations.pending_for_share_code(code).await?;
        pending.sort_by_key(|invitation| invitation.created_at);
        let invitation = pending
            .pop()
            .ok_or_else(|| AppError::not_found("No pending invitation for this code"))?;

        if invitation.is_expired(Utc::now()) {
            return Err(AppError::expired("This invitation has expired"));
        }

        let collaborator = self
            .add_collaborator(
                invitation.diary_id,
                &caller,
                invitation.role.into(),
                invitation.invited_by,
            )
            .await?;

        self.invitations
            .set_status(invitation.id, InvitationStatus::Accepted)
            .await?;

        info!(
            diary_id = %invitation.diary_id,
            user_id = %caller.user_id,
            role = %collaborator.role,
            "Invitation accepted"
        );

        Ok(collaborator)
    }

    /// All active collaborators of a diary.
    pub async fn collaborators(&self, diary_id: DiaryId) -> AppResult<Vec<DiaryCollaborator>> {
        self.collaborators.active_for_diary(diary_id).await
    }

    /// Whether the user may write into the diary: an active collaborator
    /// row with the owner or editor role.
    ///
    /// Read errors degrade to `false` with a logged warning, so a flaky
    /// store denies rather than grants.
    pub async fn can_edit(&self, diary_id: DiaryId, user_id: UserId) -> bool {
        match self.collaborators.active_for_diary(diary_id).await {
            Ok(rows) => rows
                .iter()
                .any(|row| row.user_id == user_id && row.role.can_edit()),
            Err(err) => {
                warn!(
                    diary_id = %diary_id,
                    user_id = %user_id,
                    error = %err,
                    "Edit check failed; denying"
                );
                false
            }
        }
    }

    async fn add_collaborator(
        &self,
        diary_id: DiaryId,
        identity: &Identity,
        role: CollaboratorRole,
        invited_by: UserId,
    ) -> AppResult<DiaryCollaborator> {
        let now = Utc::now();
        self.collaborators
            .create(&NewCollaborator {
                diary_id,
                user_id: identity.user_id,
                user_email: identity.email.clone(),
                user_name: identity.short_name(),
                role,
                invited_by,
                joined_at: now,
                last_active_at: now,
                status: CollaboratorStatus::Active,
            })
            .await
    }

    fn invitation_link(&self, code: &ShareCode) -> AppResult<String> {
        let mut url = url::Url::parse(&self.app_config.origin).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid application origin '{}'", self.app_config.origin),
                e,
            )
        })?;
        url.query_pairs_mut().append_pair("invite", code.as_str());
        Ok(url.to_string())
    }
}
