//! Diary entry service.

pub mod service;

pub use service::{EntryDraft, EntryService};
