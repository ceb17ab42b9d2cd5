//! Record store capability: named collections of JSON documents.
//!
//! This is the persistence seam of the application. The production backend
//! is a hosted document database; the workspace ships an in-memory
//! implementation for local use and tests. Per-document atomicity is
//! assumed for individual calls; nothing spans documents, and the two-step
//! sequences built on top (diary + owner collaborator) are best-effort.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::predicate::Predicate;

/// A stored document together with its id.
///
/// The id lives beside the document, not inside it; [`Record::decode`]
/// injects it under the `"id"` key so entity types can carry their id as a
/// regular field.
#[derive(Debug, Clone)]
pub struct Record {
    /// The store-assigned document id.
    pub id: Uuid,
    /// The document body.
    pub data: Value,
}

impl Record {
    /// Decode the document into a typed entity, injecting the record id.
    pub fn decode<T: DeserializeOwned>(self) -> AppResult<T> {
        let Value::Object(mut map) = self.data else {
            return Err(AppError::serialization(format!(
                "Record {} is not a JSON object",
                self.id
            )));
        };
        map.insert("id".to_string(), Value::String(self.id.to_string()));
        serde_json::from_value(Value::Object(map)).map_err(AppError::from)
    }
}

/// Trait for document store backends.
///
/// Queries support equality predicates on top-level fields, combined with
/// logical AND only — the subset of the hosted database's query language
/// the application actually uses.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a document and return its store-assigned id.
    async fn create(&self, collection: &str, data: Value) -> AppResult<Uuid>;

    /// Fetch a document by id. Returns `None` when absent.
    async fn find_by_id(&self, collection: &str, id: Uuid) -> AppResult<Option<Record>>;

    /// Return all documents matching every predicate. Order is unspecified.
    async fn query(&self, collection: &str, predicates: &[Predicate]) -> AppResult<Vec<Record>>;

    /// Merge the top-level fields of `patch` into an existing document.
    ///
    /// Fails with `NotFound` when the document is absent.
    async fn update(&self, collection: &str, id: Uuid, patch: Value) -> AppResult<()>;

    /// Delete a document. Deleting an absent document is not an error.
    async fn delete(&self, collection: &str, id: Uuid) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Titled {
        id: Uuid,
        title: String,
    }

    #[test]
    fn test_decode_injects_id() {
        let id = Uuid::new_v4();
        let record = Record {
            id,
            data: json!({"title": "otoño"}),
        };
        let titled: Titled = record.decode().unwrap();
        assert_eq!(titled.id, id);
        assert_eq!(titled.title, "otoño");
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let record = Record {
            id: Uuid::new_v4(),
            data: json!(42),
        };
        assert!(record.decode::<Titled>().is_err());
    }
}
