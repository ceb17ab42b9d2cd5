//! # cuaderno-service
//!
//! The application services of Cuaderno. [`CollaborationService`] owns the
//! sharing model (diaries, collaborators, invitations); [`EntryService`]
//! owns diary entries; [`PhotoService`] moves photo blobs in and out of
//! object storage. Services are constructed once at session start with
//! `Arc` references to their repositories and capabilities, and passed by
//! reference to whoever needs them.

pub mod collaboration;
pub mod entry;
pub mod photo;

pub use collaboration::{CollaborationService, ShareCodeGenerator};
pub use entry::{EntryDraft, EntryService};
pub use photo::{PhotoService, PhotoUpload};
