//! Null mailer for installs without mail credentials.

use async_trait::async_trait;
use tracing::warn;

use cuaderno_core::error::AppError;
use cuaderno_core::result::AppResult;
use cuaderno_core::traits::email::{InvitationEmail, Mailer};

/// Mailer that never delivers anything.
///
/// Used when the mail section of the configuration is disabled. Every send
/// reports a configuration error, which callers downgrade to a warning; the
/// invitation stays valid and the link can be shared by hand.
#[derive(Debug, Default, Clone)]
pub struct NullMailer;

impl NullMailer {
    /// Create a null mailer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for NullMailer {
    async fn send_invitation(&self, email: &InvitationEmail) -> AppResult<()> {
        warn!(
            to = %email.to_email,
            "Outbound mail is not configured; invitation email not sent"
        );
        Err(AppError::configuration("Outbound mail is not configured"))
    }
}
