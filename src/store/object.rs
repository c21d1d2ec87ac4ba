use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use std::time::Duration;

use super::StoreError;

/// Upload body consumed chunk by chunk.
pub type ByteChunks = BoxStream<'static, Result<Bytes, StoreError>>;

/// One entry of a bucket listing.
#[derive(Debug, Clone)]
pub struct ObjectSummary {
    pub key: String,
    pub last_modified: DateTime<Utc>,
    /// Content hash as reported by the store, usually wrapped in quotes.
    pub e_tag: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Lists every object in the bucket, following pagination to the end.
    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, StoreError>;

    /// Returns a credential-free GET URL for `key` valid for `expires_in`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError>;

    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Stores a body of unknown length without holding all of it in memory.
    async fn put_stream(
        &self,
        key: &str,
        body: ByteChunks,
        content_type: Option<&str>,
    ) -> Result<(), StoreError>;
}
