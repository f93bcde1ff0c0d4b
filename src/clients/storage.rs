use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::presigning::PresigningConfig;
use tracing::debug;

use crate::core::config::StorageConfig;
use crate::core::models::{PresignIntent, PresignRequest};
use crate::errors::BotError;

// Spaces ignores the signing region, but SigV4 still needs one.
const SIGNING_REGION: &str = "us-east-1";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Presigner: Send + Sync {
    /// Produces a time-limited url for the object named in `request`.
    ///
    /// # Errors
    ///
    /// Returns `BotError::StorageError` if the request cannot be signed.
    async fn presign(&self, request: &PresignRequest) -> Result<String, BotError>;
}

/// Signs object requests against a DigitalOcean Spaces (S3-compatible) bucket.
pub struct SpacesPresigner {
    client: S3Client,
    bucket: String,
}

impl SpacesPresigner {
    pub async fn new(storage: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            storage.key.clone(),
            storage.secret.clone(),
            None,
            None,
            "spaces-static",
        );
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(SIGNING_REGION))
            .endpoint_url(storage.endpoint.clone())
            .credentials_provider(credentials)
            .load()
            .await;

        Self {
            client: S3Client::new(&shared),
            bucket: storage.bucket.clone(),
        }
    }
}

#[async_trait]
impl Presigner for SpacesPresigner {
    async fn presign(&self, request: &PresignRequest) -> Result<String, BotError> {
        let presigning = PresigningConfig::expires_in(request.duration)
            .map_err(|e| BotError::StorageError(format!("invalid expiry: {e}")))?;

        let presigned = match request.intent {
            PresignIntent::Get => self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(&request.filename)
                .presigned(presigning)
                .await
                .map_err(|e| BotError::StorageError(format!("get_object presign: {e}")))?,
            PresignIntent::Put => self
                .client
                .put_object()
                .bucket(&self.bucket)
                .key(&request.filename)
                .presigned(presigning)
                .await
                .map_err(|e| BotError::StorageError(format!("put_object presign: {e}")))?,
        };

        debug!(
            "Presigned {:?} for {} valid {:?}",
            request.intent, request.filename, request.duration
        );
        Ok(presigned.uri().to_string())
    }
}
