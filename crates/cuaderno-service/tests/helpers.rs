//! Shared fixtures for service flow tests.
//!
//! Builds the full service stack over the in-memory capability
//! implementations; each test gets an isolated store.

#![allow(dead_code)]

use std::sync::Arc;

use cuaderno_auth::LocalIdentityProvider;
use cuaderno_core::config::{ApplicationConfig, InvitationConfig};
use cuaderno_core::traits::identity::Identity;
use cuaderno_core::traits::records::RecordStore;
use cuaderno_core::types::id::UserId;
use cuaderno_mail::MemoryMailer;
use cuaderno_records::{
    CollaboratorRepository, DiaryRepository, EntryRepository, InvitationRepository,
    MemoryRecordStore,
};
use cuaderno_service::{CollaborationService, EntryService};

/// The full service stack over in-memory capabilities.
pub struct TestApp {
    pub identity: Arc<LocalIdentityProvider>,
    pub mailer: Arc<MemoryMailer>,
    pub invitations: Arc<InvitationRepository>,
    pub collaboration: Arc<CollaborationService>,
    pub entries: Arc<EntryService>,
}

impl TestApp {
    pub fn new() -> Self {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
        let diaries = Arc::new(DiaryRepository::new(Arc::clone(&store)));
        let collaborators = Arc::new(CollaboratorRepository::new(Arc::clone(&store)));
        let invitations = Arc::new(InvitationRepository::new(Arc::clone(&store)));
        let entry_repo = Arc::new(EntryRepository::new(Arc::clone(&store)));

        let identity = Arc::new(LocalIdentityProvider::new(test_identity(
            "Device",
            "device@example.com",
        )));
        let mailer = Arc::new(MemoryMailer::new());

        let collaboration = Arc::new(CollaborationService::new(
            diaries,
            collaborators,
            Arc::clone(&invitations),
            identity.clone(),
            mailer.clone(),
            ApplicationConfig::default(),
            InvitationConfig::default(),
        ));
        let entries = Arc::new(EntryService::new(
            entry_repo,
            Arc::clone(&collaboration),
            identity.clone(),
        ));

        Self {
            identity,
            mailer,
            invitations,
            collaboration,
            entries,
        }
    }

    pub fn sign_in(&self, user: &Identity) {
        self.identity.set_current(Some(user.clone()));
    }

    pub fn sign_out(&self) {
        self.identity.set_current(None);
    }
}

/// An identity with a fresh user id.
pub fn test_identity(name: &str, email: &str) -> Identity {
    Identity {
        user_id: UserId::new(),
        email: email.to_string(),
        display_name: Some(name.to_string()),
        photo_url: None,
    }
}
