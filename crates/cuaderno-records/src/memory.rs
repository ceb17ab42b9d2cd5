//! In-memory record store implementation.
//!
//! Collections are concurrent maps of document id to JSON body. Queries
//! scan the collection; this store exists for local use and tests, not for
//! large data sets.

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use async_trait::async_trait;
use tracing::debug;

use cuaderno_core::error::AppError;
use cuaderno_core::result::AppResult;
use cuaderno_core::traits::records::{Record, RecordStore};
use cuaderno_core::types::predicate::Predicate;

/// Record store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    /// Collection name -> (document id -> document body).
    collections: DashMap<String, DashMap<Uuid, Value>>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn require_object(value: &Value, context: &str) -> AppResult<()> {
        if value.is_object() {
            Ok(())
        } else {
            Err(AppError::serialization(format!(
                "{context} must be a JSON object"
            )))
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, collection: &str, data: Value) -> AppResult<Uuid> {
        Self::require_object(&data, "Document")?;
        let id = Uuid::new_v4();
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, data);
        debug!(collection, %id, "Document created");
        Ok(id)
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> AppResult<Option<Record>> {
        let record = self
            .collections
            .get(collection)
            .and_then(|documents| documents.get(&id).map(|doc| doc.clone()))
            .map(|data| Record { id, data });
        Ok(record)
    }

    async fn query(&self, collection: &str, predicates: &[Predicate]) -> AppResult<Vec<Record>> {
        let Some(documents) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };
        let matches = documents
            .iter()
            .filter(|entry| predicates.iter().all(|p| p.matches(entry.value())))
            .map(|entry| Record {
                id: *entry.key(),
                data: entry.value().clone(),
            })
            .collect();
        Ok(matches)
    }

    async fn update(&self, collection: &str, id: Uuid, patch: Value) -> AppResult<()> {
        Self::require_object(&patch, "Patch")?;
        let documents = self
            .collections
            .get(collection)
            .ok_or_else(|| AppError::not_found(format!("Collection '{collection}' is empty")))?;
        let mut document = documents.get_mut(&id).ok_or_else(|| {
            AppError::not_found(format!("Document {id} not found in '{collection}'"))
        })?;

        let Value::Object(target) = document.value_mut() else {
            return Err(AppError::serialization(format!(
                "Document {id} is not a JSON object"
            )));
        };
        if let Value::Object(fields) = patch {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        debug!(collection, %id, "Document updated");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> AppResult<()> {
        if let Some(documents) = self.collections.get(collection) {
            documents.remove(&id);
            debug!(collection, %id, "Document deleted");
        }
        Ok(())
    }
}
