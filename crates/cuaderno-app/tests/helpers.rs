//! Shared fixtures for navigation flow tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use cuaderno_app::{MemoryInviteStash, NavigationController, RecordingRouteSink};
use cuaderno_auth::LocalIdentityProvider;
use cuaderno_core::config::{ApplicationConfig, InvitationConfig};
use cuaderno_core::error::AppError;
use cuaderno_core::result::AppResult;
use cuaderno_core::traits::identity::Identity;
use cuaderno_core::traits::records::{Record, RecordStore};
use cuaderno_core::types::id::UserId;
use cuaderno_core::types::predicate::Predicate;
use cuaderno_mail::MemoryMailer;
use cuaderno_records::{
    CollaboratorRepository, DiaryRepository, EntryRepository, InvitationRepository,
    MemoryRecordStore,
};
use cuaderno_service::{CollaborationService, EntryService};

/// Record store wrapper whose reads can be made to fail, per collection or
/// per document id. Writes always pass through, so fixtures can be seeded
/// before the failure is switched on.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryRecordStore,
    failing_collections: Mutex<HashSet<String>>,
    failing_ids: Mutex<HashSet<Uuid>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read of a collection fail.
    pub fn fail_reads(&self, collection: &str) {
        self.failing_collections
            .lock()
            .unwrap()
            .insert(collection.to_string());
    }

    /// Make point lookups of one document fail.
    pub fn fail_id(&self, id: Uuid) {
        self.failing_ids.lock().unwrap().insert(id);
    }

    fn check_collection(&self, collection: &str) -> AppResult<()> {
        if self.failing_collections.lock().unwrap().contains(collection) {
            Err(AppError::transient(format!(
                "Store unreachable for '{collection}'"
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn create(&self, collection: &str, data: Value) -> AppResult<Uuid> {
        self.inner.create(collection, data).await
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> AppResult<Option<Record>> {
        self.check_collection(collection)?;
        if self.failing_ids.lock().unwrap().contains(&id) {
            return Err(AppError::transient(format!("Store unreachable for {id}")));
        }
        self.inner.find_by_id(collection, id).await
    }

    async fn query(&self, collection: &str, predicates: &[Predicate]) -> AppResult<Vec<Record>> {
        self.check_collection(collection)?;
        self.inner.query(collection, predicates).await
    }

    async fn update(&self, collection: &str, id: Uuid, patch: Value) -> AppResult<()> {
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: &str, id: Uuid) -> AppResult<()> {
        self.inner.delete(collection, id).await
    }
}

/// The full application stack, up to the navigation controller.
pub struct TestShell {
    pub store: Arc<FlakyStore>,
    pub identity: Arc<LocalIdentityProvider>,
    pub mailer: Arc<MemoryMailer>,
    pub stash: Arc<MemoryInviteStash>,
    pub sink: Arc<RecordingRouteSink>,
    pub collaboration: Arc<CollaborationService>,
    pub entries: Arc<EntryService>,
}

impl TestShell {
    pub fn new() -> Self {
        let store = Arc::new(FlakyStore::new());
        let record_store: Arc<dyn RecordStore> = store.clone();

        let diaries = Arc::new(DiaryRepository::new(Arc::clone(&record_store)));
        let collaborators = Arc::new(CollaboratorRepository::new(Arc::clone(&record_store)));
        let invitations = Arc::new(InvitationRepository::new(Arc::clone(&record_store)));
        let entry_repo = Arc::new(EntryRepository::new(Arc::clone(&record_store)));

        let identity = Arc::new(LocalIdentityProvider::new(test_identity(
            "Device",
            "device@example.com",
        )));
        let mailer = Arc::new(MemoryMailer::new());

        let collaboration = Arc::new(CollaborationService::new(
            diaries,
            collaborators,
            invitations,
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
            store,
            identity,
            mailer,
            stash: Arc::new(MemoryInviteStash::new()),
            sink: Arc::new(RecordingRouteSink::new()),
            collaboration,
            entries,
        }
    }

    /// A controller wired to this shell's services.
    pub fn controller(&self) -> NavigationController {
        NavigationController::new(
            Arc::clone(&self.collaboration),
            Arc::clone(&self.entries),
            self.identity.clone(),
            self.stash.clone(),
            self.sink.clone(),
        )
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
