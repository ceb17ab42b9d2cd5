//! The application's route surface.

use std::fmt;
use std::sync::Mutex;

use cuaderno_core::types::id::{DiaryId, EntryId};
use cuaderno_entity::diary::ShareCode;

/// Every path the application can be at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` — the welcome screen, and the landing spot for the signed-out.
    Welcome,
    /// `/home` — the personal diary.
    Home,
    /// `/entrada/:entryId` — a personal entry.
    PersonalEntry(EntryId),
    /// `/diario/:diaryId` — a shared diary.
    SharedDiary(DiaryId),
    /// `/diario/:diaryId/entrada/:entryId` — an entry inside a shared diary.
    SharedDiaryEntry(DiaryId, EntryId),
    /// `/diarios-compartidos` — the shared diaries list.
    SharedDiaries,
    /// `/diarios-compartidos/entrada/:entryId` — an entry opened from the
    /// shared diaries list.
    SharedDiariesEntry(EntryId),
}

impl Route {
    /// Parse a path into a route. `None` for anything off the route surface.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Self::Welcome),
            ["home"] => Some(Self::Home),
            ["entrada", entry] => entry.parse().ok().map(Self::PersonalEntry),
            ["diario", diary] => diary.parse().ok().map(Self::SharedDiary),
            ["diario", diary, "entrada", entry] => {
                let diary = diary.parse().ok()?;
                let entry = entry.parse().ok()?;
                Some(Self::SharedDiaryEntry(diary, entry))
            }
            ["diarios-compartidos"] => Some(Self::SharedDiaries),
            ["diarios-compartidos", "entrada", entry] => {
                entry.parse().ok().map(Self::SharedDiariesEntry)
            }
            _ => None,
        }
    }

    /// The route's path.
    pub fn path(&self) -> String {
        match self {
            Self::Welcome => "/".to_string(),
            Self::Home => "/home".to_string(),
            Self::PersonalEntry(entry) => format!("/entrada/{entry}"),
            Self::SharedDiary(diary) => format!("/diario/{diary}"),
            Self::SharedDiaryEntry(diary, entry) => format!("/diario/{diary}/entrada/{entry}"),
            Self::SharedDiaries => "/diarios-compartidos".to_string(),
            Self::SharedDiariesEntry(entry) => format!("/diarios-compartidos/entrada/{entry}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Extract the invitation share code from a query string, if present.
///
/// Accepts the query with or without its leading `?`.
pub fn invite_code(query: &str) -> Option<ShareCode> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "invite" && !value.is_empty())
        .map(|(_, value)| ShareCode::from(value.as_ref()))
}

/// Where the controller reports route changes.
///
/// The browser shell maps `replace` and `push` onto history operations.
/// Selection toggles and other programmatic state changes always go
/// through `replace` so they never pollute the history stack.
pub trait RouteSink: Send + Sync + std::fmt::Debug {
    /// Replace the current history entry with the route.
    fn replace(&self, route: &Route);
    /// Push the route as a new history entry.
    fn push(&self, route: &Route);
}

/// Route sink that records every emission, for tests and headless shells.
#[derive(Debug, Default)]
pub struct RecordingRouteSink {
    replaced: Mutex<Vec<Route>>,
    pushed: Mutex<Vec<Route>>,
}

impl RecordingRouteSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route emitted through `replace`, in order.
    pub fn replaced(&self) -> Vec<Route> {
        self.replaced.lock().expect("sink lock poisoned").clone()
    }

    /// Every route emitted through `push`, in order.
    pub fn pushed(&self) -> Vec<Route> {
        self.pushed.lock().expect("sink lock poisoned").clone()
    }

    /// The most recent `replace` emission.
    pub fn last_replaced(&self) -> Option<Route> {
        self.replaced().last().copied()
    }
}

impl RouteSink for RecordingRouteSink {
    fn replace(&self, route: &Route) {
        self.replaced.lock().expect("sink lock poisoned").push(*route);
    }

    fn push(&self, route: &Route) {
        self.pushed.lock().expect("sink lock poisoned").push(*route);
    }
}
