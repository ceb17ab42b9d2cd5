//! Object storage capability for photo blobs.
//!
//! Photos are uploaded before the entry that references them is saved; the
//! record store only ever sees the resulting URLs.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// The result of storing a blob: where it can be fetched from, and the
/// storage path needed to delete it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Publicly resolvable URL of the stored blob.
    pub url: String,
    /// Path within the storage provider.
    pub path: String,
}

/// Trait for blob storage backends.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Store a blob at the given path and return its URL and path.
    async fn upload(&self, path: &str, data: Bytes) -> AppResult<StoredObject>;

    /// Delete the blob at the given path.
    async fn delete(&self, path: &str) -> AppResult<()>;
}
