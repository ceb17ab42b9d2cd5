//! Typed repositories over the record-store capability.
//!
//! Each repository owns one collection and exposes the entity-specific
//! queries the services need. Entity-specific methods live on the concrete
//! repository structs.

pub mod collaborator;
pub mod diary;
pub mod entry;
pub mod invitation;

pub use collaborator::CollaboratorRepository;
pub use diary::DiaryRepository;
pub use entry::EntryRepository;
pub use invitation::InvitationRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;

use cuaderno_core::result::AppResult;
use cuaderno_core::traits::records::{Record, RecordStore};

/// Serialize a `New*` document, store it, and decode it back with the
/// store-assigned id.
pub(crate) async fn create_document<N, T>(
    store: &dyn RecordStore,
    collection: &str,
    new: &N,
) -> AppResult<T>
where
    N: Serialize,
    T: DeserializeOwned,
{
    let data = serde_json::to_value(new)?;
    let id = store.create(collection, data.clone()).await?;
    Record { id, data }.decode()
}

/// Decode a batch of records into typed entities.
pub(crate) fn decode_all<T: DeserializeOwned>(records: Vec<Record>) -> AppResult<Vec<T>> {
    records.into_iter().map(Record::decode).collect()
}
