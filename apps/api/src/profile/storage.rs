use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use crate::profile::service::ProfileError;

/// Public blob storage for profile images and resume files.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `body` under `key` and returns its public URL.
    async fn upload(&self, key: &str, body: Bytes, content_type: &str)
        -> Result<String, ProfileError>;
}

pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base: String,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base: String) -> Self {
        Self {
            client,
            bucket,
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_base, self.bucket, key)
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String, ProfileError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e, &self.bucket))?;

        info!("Uploaded s3://{}/{}", self.bucket, key);
        Ok(self.public_url(key))
    }
}

fn classify_sdk_error<E, R>(err: &SdkError<E, R>, bucket: &str) -> ProfileError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => ProfileError::Unreachable,
        _ if err.code() == Some("NoSuchBucket") => ProfileError::BucketNotFound(bucket.to_string()),
        _ => ProfileError::from_message(&DisplayErrorContext(err).to_string(), bucket),
    }
}
