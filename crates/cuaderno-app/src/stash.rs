//! Pending invitation stash.
//!
//! An invitation link can arrive before the user is signed in. The code is
//! stashed outside the record store, survives the sign-in round trip, and
//! is replayed exactly once when identity becomes available.

use std::sync::Mutex;

use cuaderno_entity::diary::ShareCode;

/// Client-side storage for at most one pending invitation code.
pub trait InviteStash: Send + Sync + std::fmt::Debug {
    /// Remember a code, replacing any previous one.
    fn put(&self, code: ShareCode);

    /// Take the stashed code, clearing the stash.
    fn take(&self) -> Option<ShareCode>;
}

/// Invite stash held in process memory. Browser shells back the same trait
/// with local storage instead.
#[derive(Debug, Default)]
pub struct MemoryInviteStash {
    code: Mutex<Option<ShareCode>>,
}

impl MemoryInviteStash {
    /// Create an empty stash.
    pub fn new() -> Self {
        Self::default()
    }
}

impl InviteStash for MemoryInviteStash {
    fn put(&self, code: ShareCode) {
        *self.code.lock().expect("stash lock poisoned") = Some(code);
    }

    fn take(&self) -> Option<ShareCode> {
        self.code.lock().expect("stash lock poisoned").take()
    }
}
