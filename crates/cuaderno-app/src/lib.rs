//! # cuaderno-app
//!
//! The view-model layer of Cuaderno: the route surface, the view state
//! machine, and the [`NavigationController`] that keeps both in sync while
//! loading whatever the current view needs. Rendering belongs to the
//! embedding shell; this crate owns what is shown, not how.

pub mod controller;
pub mod labels;
pub mod route;
pub mod state;
pub mod stash;

pub use controller::NavigationController;
pub use labels::{EntryLabels, load_entry_labels};
pub use route::{RecordingRouteSink, Route, RouteSink, invite_code};
pub use state::{DiaryContext, ViewState};
pub use stash::{InviteStash, MemoryInviteStash};
