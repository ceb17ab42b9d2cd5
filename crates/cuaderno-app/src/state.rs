//! The view state machine.

use cuaderno_core::types::id::{DiaryId, EntryId};

use crate::route::Route;

/// Which diary's entries the view is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiaryContext {
    /// The user's own diary.
    Personal,
    /// A specific shared diary.
    Shared(DiaryId),
    /// The shared diaries list.
    SharedList,
}

impl DiaryContext {
    /// The state the view returns to when nothing is selected in this
    /// context.
    pub fn parent_state(&self) -> ViewState {
        match self {
            Self::Personal => ViewState::PersonalDiary,
            Self::Shared(diary_id) => ViewState::SharedDiaryOpen(*diary_id),
            Self::SharedList => ViewState::SharedDiaryBrowsing,
        }
    }

    /// The route of an entry selected in this context.
    pub fn entry_route(&self, entry_id: EntryId) -> Route {
        match self {
            Self::Personal => Route::PersonalEntry(entry_id),
            Self::Shared(diary_id) => Route::SharedDiaryEntry(*diary_id, entry_id),
            Self::SharedList => Route::SharedDiariesEntry(entry_id),
        }
    }
}

/// Where the view currently is.
///
/// Selection is part of the state shape, so at most one entry can ever be
/// selected; there is no multi-select to rule out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Nobody is signed in; the welcome screen shows.
    SignedOut,
    /// The personal diary, nothing selected.
    PersonalDiary,
    /// The shared diaries list.
    SharedDiaryBrowsing,
    /// A shared diary is open, nothing selected.
    SharedDiaryOpen(DiaryId),
    /// Exactly one entry is selected.
    EntrySelected {
        /// The diary context the entry was selected in.
        context: DiaryContext,
        /// The selected entry.
        entry_id: EntryId,
    },
    /// The entry form is open.
    EntryEditing {
        /// The diary context the new entry will be saved into.
        context: DiaryContext,
        /// Where cancel returns to.
        previous: Box<ViewState>,
    },
}

impl ViewState {
    /// The diary context of the current state.
    pub fn context(&self) -> DiaryContext {
        match self {
            Self::SignedOut | Self::PersonalDiary => DiaryContext::Personal,
            Self::SharedDiaryBrowsing => DiaryContext::SharedList,
            Self::SharedDiaryOpen(diary_id) => DiaryContext::Shared(*diary_id),
            Self::EntrySelected { context, .. } | Self::EntryEditing { context, .. } => *context,
        }
    }

    /// The selected entry, if any.
    pub fn selected_entry(&self) -> Option<EntryId> {
        match self {
            Self::EntrySelected { entry_id, .. } => Some(*entry_id),
            _ => None,
        }
    }

    /// The route this state shows at.
    ///
    /// Editing keeps the route of the state it was entered from; the form
    /// has no address of its own.
    pub fn route(&self) -> Route {
        match self {
            Self::SignedOut => Route::Welcome,
            Self::PersonalDiary => Route::Home,
            Self::SharedDiaryBrowsing => Route::SharedDiaries,
            Self::SharedDiaryOpen(diary_id) => Route::SharedDiary(*diary_id),
            Self::EntrySelected { context, entry_id } => context.entry_route(*entry_id),
            Self::EntryEditing { previous, .. } => previous.route(),
        }
    }
}
