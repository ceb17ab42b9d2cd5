//! Mail capability for invitation delivery.
//!
//! Sending is best-effort everywhere it is used: an invitation stays valid
//! whether or not the email about it went out, so callers log a failed send
//! and move on.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// The fields of an invitation email, as handed to the mail template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationEmail {
    /// Recipient address.
    pub to_email: String,
    /// Title of the diary being shared.
    pub diary_title: String,
    /// Display name of the user sending the invitation.
    pub inviter_name: String,
    /// The link that redeems the invitation (`<origin>?invite=<code>`).
    pub invitation_link: String,
    /// Human-readable role label for the body.
    pub role_label: String,
    /// The date the invitation stops working.
    pub expires_on: NaiveDate,
}

/// Trait for outbound mail backends.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Send an invitation email.
    async fn send_invitation(&self, email: &InvitationEmail) -> AppResult<()>;
}
