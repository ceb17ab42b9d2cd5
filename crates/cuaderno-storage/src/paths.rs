//! Photo path convention.

use chrono::{DateTime, Utc};

use cuaderno_core::types::id::UserId;

/// Builds storage paths for diary photos.
///
/// The layout is `<prefix>/<user_id>/<timestamp_millis>/<filename>`, so one
/// upload batch lands in one directory and the owner is visible in the path.
#[derive(Debug, Clone)]
pub struct PhotoPaths {
    prefix: String,
}

impl PhotoPaths {
    /// Create a path builder with the given prefix (no trailing slash).
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        while prefix.ends_with('/') {
            prefix.pop();
        }
        Self { prefix }
    }

    /// The storage path for a photo uploaded at `at` by `user_id`.
    pub fn photo_path(&self, user_id: UserId, at: DateTime<Utc>, filename: &str) -> String {
        let filename = sanitize(filename);
        format!(
            "{}/{}/{}/{}",
            self.prefix,
            user_id,
            at.timestamp_millis(),
            filename
        )
    }
}

/// Strip path separators and other filesystem-hostile characters from an
/// uploaded filename.
fn sanitize(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "foto".to_string()
    } else {
        cleaned
    }
}
