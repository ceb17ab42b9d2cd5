//! In-memory object store implementation.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use cuaderno_core::result::AppResult;
use cuaderno_core::traits::objects::{ObjectStore, StoredObject};

/// Object store backed by process memory.
///
/// URLs use the `memory://` scheme; they resolve nowhere but keep the rest
/// of the application oblivious to where blobs actually live.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: DashMap<String, Bytes>,
}

impl MemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored bytes at a path, if any. Test helper.
    pub fn get(&self, path: &str) -> Option<Bytes> {
        self.objects.get(path).map(|entry| entry.clone())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(&self, path: &str, data: Bytes) -> AppResult<StoredObject> {
        let size = data.len();
        self.objects.insert(path.to_string(), data);
        debug!(path, size, "Object stored");
        Ok(StoredObject {
            url: format!("memory://{path}"),
            path: path.to_string(),
        })
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.objects.remove(path);
        debug!(path, "Object deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_returns_url_and_path() {
        let store = MemoryObjectStore::new();
        let stored = store
            .upload("diary-photos/u/1/a.jpg", Bytes::from_static(b"jpeg"))
            .await
            .unwrap();
        assert_eq!(stored.url, "memory://diary-photos/u/1/a.jpg");
        assert_eq!(stored.path, "diary-photos/u/1/a.jpg");
        assert_eq!(store.get("diary-photos/u/1/a.jpg").unwrap(), "jpeg");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryObjectStore::new();
        store
            .upload("p", Bytes::from_static(b"x"))
            .await
            .unwrap();
        store.delete("p").await.unwrap();
        store.delete("p").await.unwrap();
        assert!(store.is_empty());
    }
}
