//! Diary entry domain entities.

pub mod model;

pub use model::{DiaryEntry, EntryScope, NewEntry};
