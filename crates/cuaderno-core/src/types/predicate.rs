//! Query predicates for the record store.
//!
//! The record-store capability supports exactly one operator — equality on a
//! top-level document field — combined with logical AND. Anything richer
//! (ordering, limits, projections) is the consumer's job.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;

/// A single equality condition on a named top-level field.
///
/// A query matches a document when every predicate's field is present and
/// equal to the predicate's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// The document field name to filter on.
    pub field: String,
    /// The JSON value the field must equal.
    pub value: Value,
}

impl Predicate {
    /// Create an equality predicate from any serializable value.
    pub fn eq(field: impl Into<String>, value: impl Serialize) -> AppResult<Self> {
        let value = serde_json::to_value(value).map_err(|e| {
            AppError::with_source(
                crate::error::ErrorKind::Serialization,
                "Failed to serialize predicate value",
                e,
            )
        })?;
        Ok(Self {
            field: field.into(),
            value,
        })
    }

    /// Whether the given document satisfies this predicate.
    pub fn matches(&self, document: &Value) -> bool {
        document.get(&self.field) == Some(&self.value)
    }
}
