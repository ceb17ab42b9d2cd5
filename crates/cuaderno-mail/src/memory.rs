//! Recording mailer for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use cuaderno_core::error::AppError;
use cuaderno_core::result::AppResult;
use cuaderno_core::traits::email::{InvitationEmail, Mailer};

/// Mailer that records every send into an in-memory outbox.
///
/// Flip [`set_failing`](Self::set_failing) to make sends error, for testing
/// the best-effort contract around invitation mail.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<InvitationEmail>>,
    failing: AtomicBool,
}

impl MemoryMailer {
    /// Create an empty recording mailer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Everything sent so far.
    pub fn sent(&self) -> Vec<InvitationEmail> {
        self.outbox.lock().expect("outbox lock poisoned").clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send_invitation(&self, email: &InvitationEmail) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::transient("Mail relay unavailable"));
        }
        self.outbox
            .lock()
            .expect("outbox lock poisoned")
            .push(email.clone());
        Ok(())
    }
}
