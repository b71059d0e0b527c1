//! In-memory blob store
//!
//! Containers map blob names to their content and properties. Blob names are
//! kept in a `BTreeMap` so listings come back in lexicographic order, the same
//! order Azure uses for List Blobs.

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A stored blob with the properties reported by List Blobs
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub data: Bytes,
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
}

impl StoredBlob {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Shared in-memory store of containers and their blobs
#[derive(Clone, Debug, Default)]
pub struct BlobStore {
    containers: Arc<RwLock<HashMap<String, BTreeMap<String, StoredBlob>>>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container. Returns `false` if it already exists.
    pub async fn create_container(&self, container: &str) -> bool {
        let mut containers = self.containers.write().await;
        if containers.contains_key(container) {
            return false;
        }
        containers.insert(container.to_string(), BTreeMap::new());
        true
    }

    pub async fn container_exists(&self, container: &str) -> bool {
        self.containers.read().await.contains_key(container)
    }

    /// Upload (or overwrite) a blob, stamping it with the current time
    ///
    /// Returns `None` when the container does not exist.
    pub async fn put_blob(
        &self,
        container: &str,
        name: &str,
        data: Bytes,
        content_type: &str,
    ) -> Option<StoredBlob> {
        self.put_blob_at(container, name, data, content_type, Utc::now())
            .await
    }

    /// Upload a blob with an explicit last-modified time
    pub async fn put_blob_at(
        &self,
        container: &str,
        name: &str,
        data: Bytes,
        content_type: &str,
        last_modified: DateTime<Utc>,
    ) -> Option<StoredBlob> {
        let mut containers = self.containers.write().await;
        let blobs = containers.get_mut(container)?;
        let blob = StoredBlob {
            data,
            content_type: content_type.to_string(),
            last_modified,
        };
        blobs.insert(name.to_string(), blob.clone());
        Some(blob)
    }

    pub async fn get_blob(&self, container: &str, name: &str) -> Option<StoredBlob> {
        let containers = self.containers.read().await;
        containers.get(container)?.get(name).cloned()
    }

    /// List blobs of a container, optionally restricted to a name prefix
    ///
    /// Returns `None` when the container does not exist.
    pub async fn list_blobs(
        &self,
        container: &str,
        prefix: Option<&str>,
    ) -> Option<Vec<(String, StoredBlob)>> {
        let containers = self.containers.read().await;
        let blobs = containers.get(container)?;
        Some(
            blobs
                .iter()
                .filter(|(name, _)| prefix.is_none_or(|p| name.starts_with(p)))
                .map(|(name, blob)| (name.clone(), blob.clone()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_put_requires_container() {
        let store = BlobStore::new();
        let stored = store
            .put_blob("missing", "a.apk", Bytes::from_static(b"x"), "application/octet-stream")
            .await;
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_create_container_twice() {
        let store = BlobStore::new();
        assert!(store.create_container("apk").await);
        assert!(!store.create_container("apk").await);
        assert!(store.container_exists("apk").await);
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_filtered_by_prefix() {
        let store = BlobStore::new();
        store.create_container("apk").await;
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        for name in ["release/b.apk", "debug/a.apk", "release/a.apk"] {
            store
                .put_blob_at("apk", name, Bytes::from_static(b"data"), "application/octet-stream", ts)
                .await;
        }

        let all = store.list_blobs("apk", None).await.unwrap();
        let names: Vec<_> = all.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["debug/a.apk", "release/a.apk", "release/b.apk"]);

        let release = store.list_blobs("apk", Some("release/")).await.unwrap();
        assert_eq!(release.len(), 2);
        assert_eq!(release[0].1.size(), 4);
    }
}
