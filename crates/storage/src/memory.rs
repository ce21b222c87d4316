//! In-process object store.
//!
//! Signed URLs are not verifiable; they only mimic the shape of real ones
//! (`{base_url}/{bucket}/{key}?expires=..`) so callers can be exercised
//! without network access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{ObjectStore, StorageError};

/// Default host used in generated URLs.
pub const DEFAULT_BASE_URL: &str = "https://storage.local.test";

/// A stored object's bytes and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Object store backed by a `HashMap`.
#[derive(Debug)]
pub struct MemoryObjectStore {
    bucket: String,
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
    fail_uploads: AtomicBool,
    fail_lookups: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self::with_base_url(bucket, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(bucket: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
            fail_uploads: AtomicBool::new(false),
            fail_lookups: AtomicBool::new(false),
        }
    }

    /// Host prefix of every generated URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make subsequent uploads fail, to simulate an unreachable backend.
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `exists` calls fail.
    pub fn set_fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Fetch a stored object.
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn url(&self, key: &str, expires_in: Duration) -> String {
        format!(
            "{}/{}/{}?expires={}",
            self.base_url,
            self.bucket,
            key,
            expires_in.as_secs()
        )
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Upload {
                key: key.to_string(),
                message: "simulated backend failure".to_string(),
            });
        }
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(StorageError::Head {
                key: key.to_string(),
                message: "simulated backend failure".to_string(),
            });
        }
        Ok(self.objects.read().await.contains_key(key))
    }

    async fn signed_download_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        Ok(self.url(key, expires_in))
    }

    async fn signed_upload_url(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        Ok(format!(
            "{}&method=PUT&content-type={}",
            self.url(key, expires_in),
            content_type.replace('/', "%2F")
        ))
    }
}
