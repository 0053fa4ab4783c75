//! Uploaded file-set store
//!
//! Thin in-memory table keyed by upload id, holding file sets between the
//! upload call and job submission. Same explicit-store shape as the job
//! store; uploads are never reaped during a run.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use chrysalis_core::domain::artifact::SourceFile;

#[derive(Clone, Default)]
pub struct UploadStore {
    uploads: Arc<RwLock<HashMap<String, Vec<SourceFile>>>>,
}

impl UploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a file set and returns its generated upload id.
    pub async fn insert(&self, files: Vec<SourceFile>) -> String {
        let id = format!(
            "upload-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            &Uuid::new_v4().simple().to_string()[..7]
        );
        self.uploads.write().await.insert(id.clone(), files);
        id
    }

    pub async fn get(&self, id: &str) -> Option<Vec<SourceFile>> {
        self.uploads.read().await.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = UploadStore::new();
        let id = store
            .insert(vec![SourceFile {
                path: "index.php".to_string(),
                content: "<?php ?>".to_string(),
            }])
            .await;

        assert!(id.starts_with("upload-"));
        let files = store.get(&id).await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(store.get("upload-unknown").await.is_none());
    }
}
