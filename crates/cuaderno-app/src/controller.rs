//! The navigation controller.
//!
//! Owns the view state machine and everything the current view shows:
//! entry lists, the open shared diary, display label caches, and the
//! notice queue. Every state change is mirrored into the address bar
//! through a [`RouteSink`], always with replace semantics; externally
//! observed route changes (back/forward) come back in through
//! [`NavigationController::handle_route_change`] and re-derive the state.

use std::sync::Arc;

use tracing::warn;

use cuaderno_core::error::AppError;
use cuaderno_core::result::AppResult;
use cuaderno_core::traits::identity::{Identity, IdentityProvider};
use cuaderno_core::types::id::{DiaryId, EntryId, UserId};
use cuaderno_entity::diary::{ShareCode, SharedDiary};
use cuaderno_entity::entry::{DiaryEntry, EntryScope};
use cuaderno_service::{CollaborationService, EntryDraft, EntryService};

use crate::labels::{EntryLabels, load_entry_labels};
use crate::route::{self, Route, RouteSink};
use crate::state::{DiaryContext, ViewState};
use crate::stash::InviteStash;

/// User-facing notices, verbatim from the product copy.
const LOAD_ENTRIES_NOTICE: &str =
    "Error al cargar las entradas. Por favor, verifica tu conexión e intenta de nuevo.";
const LOAD_DIARIES_NOTICE: &str =
    "Error al cargar los diarios compartidos. Por favor, inténtalo de nuevo.";
const ACCEPT_INVITE_NOTICE: &str =
    "Error al aceptar la invitación. Por favor, inténtalo de nuevo.";

/// Reconciles the current view against the address bar and loads what the
/// view needs.
pub struct NavigationController {
    /// Collaboration service.
    collaboration: Arc<CollaborationService>,
    /// Entry service.
    entry_service: Arc<EntryService>,
    /// Identity provider.
    identity: Arc<dyn IdentityProvider>,
    /// Pending invitation stash.
    stash: Arc<dyn InviteStash>,
    /// Where route changes are reported.
    sink: Arc<dyn RouteSink>,
    /// Current view state.
    state: ViewState,
    /// Entries shown in the sidebar list.
    entries: Vec<DiaryEntry>,
    /// Shared diaries shown while browsing.
    diaries: Vec<SharedDiary>,
    /// The open shared diary, when in a shared context.
    current_diary: Option<SharedDiary>,
    /// Display labels for the loaded entries.
    labels: EntryLabels,
    /// Pending user-facing notices.
    notices: Vec<String>,
    /// Whether the sidebar is expanded.
    sidebar_expanded: bool,
}

impl NavigationController {
    /// Creates a controller in the signed-out state.
    pub fn new(
        collaboration: Arc<CollaborationService>,
        entry_service: Arc<EntryService>,
        identity: Arc<dyn IdentityProvider>,
        stash: Arc<dyn InviteStash>,
        sink: Arc<dyn RouteSink>,
    ) -> Self {
        Self {
            collaboration,
            entry_service,
            identity,
            stash,
            sink,
            state: ViewState::SignedOut,
            entries: Vec::new(),
            diaries: Vec::new(),
            current_diary: None,
            labels: EntryLabels::default(),
            notices: Vec::new(),
            sidebar_expanded: true,
        }
    }

    /// The current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The loaded entry list.
    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    /// The shared diaries loaded for browsing.
    pub fn diaries(&self) -> &[SharedDiary] {
        &self.diaries
    }

    /// The open shared diary, when in a shared context.
    pub fn current_diary(&self) -> Option<&SharedDiary> {
        self.current_diary.as_ref()
    }

    /// Display labels for the loaded entries.
    pub fn labels(&self) -> &EntryLabels {
        &self.labels
    }

    /// Drain the pending user-facing notices.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Whether the sidebar is expanded.
    pub fn sidebar_expanded(&self) -> bool {
        self.sidebar_expanded
    }

    /// Flip the sidebar between expanded and collapsed.
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_expanded = !self.sidebar_expanded;
    }

    /// Settle into an initial state from the startup URL.
    pub async fn start(&mut self, path: &str, query: &str) {
        self.settle(path, query).await;
    }

    /// React to an externally observed route change (back/forward).
    pub async fn handle_route_change(&mut self, path: &str, query: &str) {
        self.settle(path, query).await;
    }

    async fn settle(&mut self, path: &str, query: &str) {
        let invite = route::invite_code(query);

        let Some(user) = self.identity.current_identity() else {
            // Unauthenticated access to any protected path lands on the
            // welcome route; an invite code survives the sign-in round trip
            // in the stash.
            if let Some(code) = invite {
                self.stash.put(code);
            }
            self.reset_to_signed_out();
            return;
        };

        if let Some(code) = invite.or_else(|| self.stash.take()) {
            self.accept_and_open(code).await;
            return;
        }

        match Route::parse(path) {
            Some(Route::SharedDiary(diary_id)) => {
                self.open_shared_diary_with_selection(diary_id, None).await;
            }
            Some(Route::SharedDiaryEntry(diary_id, entry_id)) => {
                self.open_shared_diary_with_selection(diary_id, Some(entry_id))
                    .await;
            }
            Some(Route::PersonalEntry(entry_id)) => {
                self.enter_personal(user.user_id, Some(entry_id)).await;
            }
            Some(Route::SharedDiaries) => {
                self.browse_shared_diaries().await;
            }
            Some(Route::SharedDiariesEntry(entry_id)) => {
                self.browse_shared_diaries().await;
                if !matches!(self.state, ViewState::SignedOut) {
                    self.state = ViewState::EntrySelected {
                        context: DiaryContext::SharedList,
                        entry_id,
                    };
                    self.emit_route();
                }
            }
            Some(Route::Welcome) | Some(Route::Home) | None => {
                self.enter_personal(user.user_id, None).await;
            }
        }
    }

    /// Notify the controller of a sign-in state change.
    ///
    /// Embedding shells forward updates from the identity provider's watch
    /// channel here. Sign-in replays a stashed invitation code, once.
    pub async fn identity_changed(&mut self, identity: Option<Identity>) {
        match identity {
            None => self.reset_to_signed_out(),
            Some(user) => {
                if let Some(code) = self.stash.take() {
                    self.accept_and_open(code).await;
                } else if matches!(self.state, ViewState::SignedOut) {
                    self.enter_personal(user.user_id, None).await;
                }
            }
        }
    }

    /// Select an entry from the list, or deselect it when it is already the
    /// selected one. Re-selection toggling is a UX contract.
    pub fn select_entry(&mut self, entry_id: EntryId) {
        let next = match &self.state {
            ViewState::EntrySelected {
                context,
                entry_id: current,
            } if *current == entry_id => context.parent_state(),
            ViewState::EntrySelected { context, .. } => ViewState::EntrySelected {
                context: *context,
                entry_id,
            },
            ViewState::PersonalDiary => ViewState::EntrySelected {
                context: DiaryContext::Personal,
                entry_id,
            },
            ViewState::SharedDiaryOpen(diary_id) => ViewState::EntrySelected {
                context: DiaryContext::Shared(*diary_id),
                entry_id,
            },
            ViewState::SharedDiaryBrowsing => ViewState::EntrySelected {
                context: DiaryContext::SharedList,
                entry_id,
            },
            ViewState::SignedOut | ViewState::EntryEditing { .. } => return,
        };
        self.state = next;
        self.emit_route();
    }

    /// Open the entry form. The state the form was opened from is where
    /// cancel returns to.
    pub fn new_entry(&mut self) {
        if matches!(self.state, ViewState::SignedOut) {
            return;
        }
        let context = self.state.context();
        let previous = std::mem::replace(&mut self.state, ViewState::PersonalDiary);
        self.state = match previous {
            // Re-opening the form keeps the original return point.
            ViewState::EntryEditing { previous, .. } => ViewState::EntryEditing { context, previous },
            other => ViewState::EntryEditing {
                context,
                previous: Box::new(other),
            },
        };
    }

    /// Save the entry being edited.
    ///
    /// The draft's scope is derived from the diary context the form was
    /// opened in. On success the new entry is prepended to the list and
    /// selected; on failure the error propagates and the view state is left
    /// unchanged so the user can retry.
    pub async fn save_entry(&mut self, mut draft: EntryDraft) -> AppResult<DiaryEntry> {
        let ViewState::EntryEditing { context, .. } = &self.state else {
            return Err(AppError::validation("No entry form is open"));
        };
        let context = *context;

        draft.scope = match context {
            DiaryContext::Shared(diary_id) => EntryScope::Shared(diary_id),
            DiaryContext::Personal | DiaryContext::SharedList => EntryScope::Personal,
        };

        let entry = self.entry_service.create_entry(draft).await?;
        self.entries.insert(0, entry.clone());
        self.state = ViewState::EntrySelected {
            context,
            entry_id: entry.id,
        };
        self.emit_route();
        Ok(entry)
    }

    /// Close the entry form and return to the state it was opened from.
    pub fn cancel_edit(&mut self) {
        if !matches!(self.state, ViewState::EntryEditing { .. }) {
            return;
        }
        let ViewState::EntryEditing { previous, .. } =
            std::mem::replace(&mut self.state, ViewState::PersonalDiary)
        else {
            unreachable!("checked above");
        };
        self.state = *previous;
        self.emit_route();
    }

    /// Delete an entry and deselect it if it was selected.
    ///
    /// Authorization for shared-diary deletes has been checked by the view
    /// offering the action; failures propagate with the list untouched.
    pub async fn delete_entry(&mut self, entry_id: EntryId) -> AppResult<()> {
        self.entry_service.delete_entry(entry_id).await?;
        self.entries.retain(|entry| entry.id != entry_id);
        if self.state.selected_entry() == Some(entry_id) {
            self.state = self.state.context().parent_state();
            self.emit_route();
        }
        Ok(())
    }

    /// Leave any shared context and reload the personal diary.
    pub async fn back_to_personal(&mut self) {
        let Some(user) = self.identity.current_identity() else {
            self.reset_to_signed_out();
            return;
        };
        self.enter_personal(user.user_id, None).await;
    }

    /// Load the shared diaries list and enter the browsing state.
    pub async fn browse_shared_diaries(&mut self) {
        let Some(user) = self.identity.current_identity() else {
            self.reset_to_signed_out();
            return;
        };
        match self.collaboration.shared_diaries_for(user.user_id).await {
            Ok(diaries) => self.diaries = diaries,
            Err(err) => {
                warn!(error = %err, "Failed to load shared diaries");
                self.diaries = Vec::new();
                self.notices.push(LOAD_DIARIES_NOTICE.to_string());
            }
        }
        self.current_diary = None;
        self.entries.clear();
        self.labels = EntryLabels::default();
        self.state = ViewState::SharedDiaryBrowsing;
        self.emit_route();
    }

    /// Open a shared diary and load its entries.
    pub async fn open_shared_diary(&mut self, diary_id: DiaryId) {
        self.open_shared_diary_with_selection(diary_id, None).await;
    }

    /// Sign out and clear all view state.
    pub async fn sign_out(&mut self) -> AppResult<()> {
        self.identity.sign_out().await?;
        self.reset_to_signed_out();
        Ok(())
    }

    async fn accept_and_open(&mut self, code: ShareCode) {
        match self.collaboration.accept_invitation(&code).await {
            Ok(collaborator) => {
                self.open_shared_diary_with_selection(collaborator.diary_id, None)
                    .await;
            }
            Err(err) => {
                warn!(error = %err, "Could not accept invitation");
                self.notices.push(ACCEPT_INVITE_NOTICE.to_string());
                self.back_to_personal().await;
            }
        }
    }

    async fn enter_personal(&mut self, user_id: UserId, selected: Option<EntryId>) {
        self.current_diary = None;
        match self.entry_service.personal_entries(user_id).await {
            Ok(entries) => self.entries = entries,
            Err(err) => {
                warn!(error = %err, "Failed to load personal entries");
                self.entries = Vec::new();
                self.notices.push(LOAD_ENTRIES_NOTICE.to_string());
            }
        }
        self.refresh_labels().await;
        self.state = match self.validate_selection(selected) {
            Some(entry_id) => ViewState::EntrySelected {
                context: DiaryContext::Personal,
                entry_id,
            },
            None => ViewState::PersonalDiary,
        };
        self.emit_route();
    }

    async fn open_shared_diary_with_selection(
        &mut self,
        diary_id: DiaryId,
        selected: Option<EntryId>,
    ) {
        let diary = match self.collaboration.diary_by_id(diary_id).await {
            Ok(Some(diary)) => diary,
            Ok(None) => {
                // Absent diary: fall back to the personal diary, as the
                // redirect to `/` would.
                self.back_to_personal().await;
                return;
            }
            Err(err) => {
                warn!(diary_id = %diary_id, error = %err, "Failed to load shared diary");
                self.notices.push(LOAD_ENTRIES_NOTICE.to_string());
                self.back_to_personal().await;
                return;
            }
        };

        self.current_diary = Some(diary);
        match self.entry_service.shared_entries(diary_id).await {
            Ok(entries) => self.entries = entries,
            Err(err) => {
                warn!(diary_id = %diary_id, error = %err, "Failed to load shared entries");
                self.entries = Vec::new();
                self.notices.push(LOAD_ENTRIES_NOTICE.to_string());
            }
        }
        self.refresh_labels().await;
        self.state = match self.validate_selection(selected) {
            Some(entry_id) => ViewState::EntrySelected {
                context: DiaryContext::Shared(diary_id),
                entry_id,
            },
            None => ViewState::SharedDiaryOpen(diary_id),
        };
        self.emit_route();
    }

    async fn refresh_labels(&mut self) {
        let current = self.identity.current_identity();
        self.labels = load_entry_labels(&self.collaboration, &self.entries, current.as_ref()).await;
    }

    /// A selection from the URL only survives if the entry is actually in
    /// the loaded list.
    fn validate_selection(&self, selected: Option<EntryId>) -> Option<EntryId> {
        selected.filter(|id| self.entries.iter().any(|entry| entry.id == *id))
    }

    fn reset_to_signed_out(&mut self) {
        self.entries.clear();
        self.diaries.clear();
        self.current_diary = None;
        self.labels = EntryLabels::default();
        self.state = ViewState::SignedOut;
        self.emit_route();
    }

    fn emit_route(&self) {
        self.sink.replace(&self.state.route());
    }
}
