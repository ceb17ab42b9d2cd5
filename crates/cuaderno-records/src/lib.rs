//! # cuaderno-records
//!
//! Persistence layer for Cuaderno: an in-memory [`RecordStore`]
//! implementation and the typed repositories the services talk to. The
//! repositories only ever use the capability trait, so swapping in a real
//! document database touches nothing above this crate.
//!
//! [`RecordStore`]: cuaderno_core::traits::records::RecordStore

pub mod memory;
pub mod repository;

pub use memory::MemoryRecordStore;
pub use repository::{
    CollaboratorRepository, DiaryRepository, EntryRepository, InvitationRepository,
};
