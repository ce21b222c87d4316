//! S3-compatible object store.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::{ObjectStore, StorageError};

/// Connection settings for [`S3ObjectStore`].
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    /// Custom endpoint (MinIO, GCS interoperability). `None` uses AWS.
    pub endpoint: Option<String>,
    pub region: String,
    /// Static credentials. When both are `None` the SDK's default
    /// credential chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Object store backed by the AWS S3 SDK.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build the SDK client. Does not contact the backend.
    pub async fn connect(config: S3Config) -> Result<Self, StorageError> {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }

        match (&config.access_key_id, &config.secret_access_key) {
            (Some(id), Some(secret)) => {
                let credentials =
                    Credentials::new(id.clone(), secret.clone(), None, None, "cookorder-env");
                loader = loader.credentials_provider(credentials);
            }
            (None, None) => {}
            _ => {
                return Err(StorageError::Config(
                    "access key id and secret access key must be set together".to_string(),
                ))
            }
        }

        let shared_config = loader.load().await;

        // Custom endpoints rarely support virtual-hosted bucket addressing.
        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        tracing::info!(
            bucket = %config.bucket,
            endpoint = config.endpoint.as_deref().unwrap_or("aws"),
            "Object storage client configured"
        );

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket,
        })
    }

    fn presigning(key: &str, expires_in: Duration) -> Result<PresigningConfig, StorageError> {
        PresigningConfig::expires_in(expires_in).map_err(|e| StorageError::Presign {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let size_bytes = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::debug!(bucket = %self.bucket, object = key, size_bytes, "Object uploaded");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(StorageError::Head {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            }),
        }
    }

    async fn signed_download_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presigning(key, expires_in)?)
            .await
            .map_err(|e| StorageError::Presign {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(request.uri().to_string())
    }

    async fn signed_upload_url(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(Self::presigning(key, expires_in)?)
            .await
            .map_err(|e| StorageError::Presign {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(request.uri().to_string())
    }
}
