//! Identity capability: who is currently signed in, and change
//! notifications.
//!
//! The production provider is an interactive OAuth flow owned by the host
//! shell; the workspace ships a local provider for development and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::result::AppResult;
use crate::types::id::UserId;

/// The signed-in user's profile as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user identifier.
    pub user_id: UserId,
    /// The account email address.
    pub email: String,
    /// Display name, when the provider has one.
    pub display_name: Option<String>,
    /// Avatar URL, when the provider has one.
    pub photo_url: Option<String>,
}

impl Identity {
    /// Best available short display name: the display name if set,
    /// otherwise the local part of the email address.
    pub fn short_name(&self) -> String {
        if let Some(name) = &self.display_name {
            if !name.is_empty() {
                return name.clone();
            }
        }
        self.email
            .split('@')
            .next()
            .filter(|part| !part.is_empty())
            .unwrap_or("usuario")
            .to_string()
    }
}

/// Trait for identity backends.
///
/// Change notification is a [`watch`] channel: callers keep the receiver
/// for as long as they care, and dropping it unsubscribes. The channel
/// always carries the latest value, so a fresh subscriber immediately
/// observes the current sign-in state.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Run the provider's interactive sign-in flow and return the identity.
    async fn sign_in_interactive(&self) -> AppResult<Identity>;

    /// Sign the current user out.
    async fn sign_out(&self) -> AppResult<()>;

    /// The currently signed-in identity, if any.
    fn current_identity(&self) -> Option<Identity>;

    /// Subscribe to sign-in state changes.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}
