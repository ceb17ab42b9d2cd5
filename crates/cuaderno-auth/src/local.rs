//! Local identity provider.

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::info;

use cuaderno_core::result::AppResult;
use cuaderno_core::traits::identity::{Identity, IdentityProvider};

/// Identity provider backed by a single configured device identity.
///
/// "Interactive" sign-in publishes the device identity on the watch channel
/// without any real flow. Embedding shells that front a real provider call
/// [`set_current`](Self::set_current) whenever the upstream session changes,
/// and every subscriber observes the update.
#[derive(Debug)]
pub struct LocalIdentityProvider {
    device: Identity,
    current: watch::Sender<Option<Identity>>,
}

impl LocalIdentityProvider {
    /// Create a signed-out provider for the given device identity.
    pub fn new(device: Identity) -> Self {
        let (current, _) = watch::channel(None);
        Self { device, current }
    }

    /// Create a provider that starts already signed in.
    pub fn signed_in(device: Identity) -> Self {
        let (current, _) = watch::channel(Some(device.clone()));
        Self { device, current }
    }

    /// Replace the current identity, notifying every subscriber.
    pub fn set_current(&self, identity: Option<Identity>) {
        self.current.send_replace(identity);
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in_interactive(&self) -> AppResult<Identity> {
        self.current.send_replace(Some(self.device.clone()));
        info!(user_id = %self.device.user_id, "Signed in");
        Ok(self.device.clone())
    }

    async fn sign_out(&self) -> AppResult<()> {
        self.current.send_replace(None);
        info!("Signed out");
        Ok(())
    }

    fn current_identity(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.current.subscribe()
    }
}
