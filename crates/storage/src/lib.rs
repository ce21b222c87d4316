//! Object-storage gateway for dish photos.
//!
//! [`ObjectStore`] is the seam handlers depend on. [`S3ObjectStore`] talks to
//! any S3-compatible endpoint (AWS, MinIO, GCS interoperability);
//! [`MemoryObjectStore`] keeps objects in process for tests and local runs.

use std::time::Duration;

use async_trait::async_trait;

pub mod memory;
pub mod s3;

pub use memory::MemoryObjectStore;
pub use s3::{S3Config, S3ObjectStore};

/// Errors from the object-storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to upload object '{key}': {message}")]
    Upload { key: String, message: String },

    #[error("Failed to delete object '{key}': {message}")]
    Delete { key: String, message: String },

    #[error("Failed to read metadata of object '{key}': {message}")]
    Head { key: String, message: String },

    #[error("Failed to sign URL for object '{key}': {message}")]
    Presign { key: String, message: String },

    #[error("Invalid storage configuration: {0}")]
    Config(String),
}

/// Operations against a single bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket every operation targets.
    fn bucket(&self) -> &str;

    /// Store `data` under `key` with the given content type.
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> Result<(), StorageError>;

    /// Remove `key`. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Whether `key` exists.
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// A time-limited GET URL for `key`.
    async fn signed_download_url(&self, key: &str, expires_in: Duration)
        -> Result<String, StorageError>;

    /// A time-limited PUT URL for `key`, bound to `content_type`.
    async fn signed_upload_url(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;
}
