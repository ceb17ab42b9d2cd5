//! Concurrent photo uploads under the diary photo path convention.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use futures::future::join_all;
use tracing::warn;

use cuaderno_core::config::StorageConfig;
use cuaderno_core::result::AppResult;
use cuaderno_core::traits::objects::{ObjectStore, StoredObject};
use cuaderno_core::types::id::UserId;
use cuaderno_storage::PhotoPaths;

/// One photo file handed over by the entry form.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// Original filename, sanitized before it reaches storage.
    pub filename: String,
    /// File content.
    pub data: Bytes,
}

/// Uploads photo blobs ahead of entry creation; entries store only the
/// resulting URLs.
#[derive(Debug, Clone)]
pub struct PhotoService {
    /// Object store capability.
    store: Arc<dyn ObjectStore>,
    /// Path convention.
    paths: PhotoPaths,
}

impl PhotoService {
    /// Creates a new photo service.
    pub fn new(store: Arc<dyn ObjectStore>, config: &StorageConfig) -> Self {
        Self {
            store,
            paths: PhotoPaths::new(config.photo_prefix.clone()),
        }
    }

    /// Uploads every file concurrently and waits for all of them.
    ///
    /// One batch shares one timestamp directory. Individual failures are
    /// logged; if any upload failed, the first error is returned so the
    /// initiating action can be reported as failed and retried.
    pub async fn upload_photos(
        &self,
        user_id: UserId,
        files: Vec<PhotoUpload>,
    ) -> AppResult<Vec<StoredObject>> {
        let at = Utc::now();
        let uploads = files.into_iter().map(|file| {
            let store = Arc::clone(&self.store);
            let path = self.paths.photo_path(user_id, at, &file.filename);
            async move { store.upload(&path, file.data).await }
        });

        let mut stored = Vec::new();
        let mut first_error = None;
        for result in join_all(uploads).await {
            match result {
                Ok(object) => stored.push(object),
                Err(err) => {
                    warn!(error = %err, "Photo upload failed");
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(stored),
        }
    }

    /// Removes a photo blob by its storage path.
    pub async fn delete_photo(&self, path: &str) -> AppResult<()> {
        self.store.delete(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuaderno_storage::MemoryObjectStore;

    fn upload(name: &str, content: &'static [u8]) -> PhotoUpload {
        PhotoUpload {
            filename: name.to_string(),
            data: Bytes::from_static(content),
        }
    }

    #[tokio::test]
    async fn test_batch_lands_under_the_photo_convention() {
        let store = Arc::new(MemoryObjectStore::new());
        let service = PhotoService::new(store.clone(), &StorageConfig::default());
        let user = UserId::new();

        let stored = service
            .upload_photos(user, vec![upload("a.jpg", b"a"), upload("b.jpg", b"b")])
            .await
            .unwrap();

        assert_eq!(stored.len(), 2);
        let prefix = format!("diary-photos/{user}/");
        assert!(stored.iter().all(|s| s.path.starts_with(&prefix)));
        assert!(stored[0].path.ends_with("/a.jpg"));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_photo_removes_the_blob() {
        let store = Arc::new(MemoryObjectStore::new());
        let service = PhotoService::new(store.clone(), &StorageConfig::default());

        let stored = service
            .upload_photos(UserId::new(), vec![upload("a.jpg", b"a")])
            .await
            .unwrap();
        service.delete_photo(&stored[0].path).await.unwrap();
        assert!(store.is_empty());
    }
}
