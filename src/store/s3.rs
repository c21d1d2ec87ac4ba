use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_sdk_s3::Client;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::time::Duration;

use super::parts::PartReader;
use super::{ByteChunks, ObjectStore, ObjectSummary, StoreError};

/// Bodies up to this size go out as a single PutObject; larger ones are
/// sent as a multipart upload in parts of this size (S3 requires >= 5 MiB
/// for every part but the last).
pub const PART_SIZE: usize = 8 * 1024 * 1024;

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    part_size: usize,
}

impl S3ObjectStore {
    pub fn new(config: &aws_config::SdkConfig, bucket: impl Into<String>) -> Self {
        Self::from_client(Client::new(config), bucket)
    }

    pub fn from_client(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            part_size: PART_SIZE,
        }
    }

    pub fn with_part_size(mut self, part_size: usize) -> Self {
        self.part_size = part_size;
        self
    }

    async fn create_multipart_upload(
        &self,
        key: &str,
        content_type: Option<&str>,
    ) -> Result<String, StoreError> {
        let created = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .set_content_type(content_type.map(str::to_owned))
            .send()
            .await
            .map_err(|e| put_failed(key, e))?;

        created
            .upload_id()
            .map(str::to_owned)
            .ok_or_else(|| StoreError::Put {
                key: key.to_string(),
                message: "multipart upload id missing from response".into(),
            })
    }

    async fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        part: Bytes,
    ) -> Result<CompletedPart, StoreError> {
        let uploaded = self
            .client
            .upload_part()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .part_number(part_number)
            .body(ByteStream::from(part))
            .send()
            .await
            .map_err(|e| put_failed(key, e))?;

        tracing::debug!(key = %key, part_number, "Uploaded part");

        Ok(CompletedPart::builder()
            .part_number(part_number)
            .set_e_tag(uploaded.e_tag().map(str::to_owned))
            .build())
    }

    async fn upload_parts(
        &self,
        key: &str,
        upload_id: &str,
        first: Bytes,
        reader: &mut PartReader,
    ) -> Result<Vec<CompletedPart>, StoreError> {
        let mut parts = vec![self.upload_part(key, upload_id, 1, first).await?];

        while let Some(part) = reader.next_part().await? {
            let part_number = parts.len() as i32 + 1;
            parts.push(self.upload_part(key, upload_id, part_number, part).await?);
        }

        Ok(parts)
    }

    async fn complete_multipart_upload(
        &self,
        key: &str,
        upload_id: &str,
        parts: Vec<CompletedPart>,
    ) -> Result<(), StoreError> {
        let completed = CompletedMultipartUpload::builder()
            .set_parts(Some(parts))
            .build();

        self.client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .multipart_upload(completed)
            .send()
            .await
            .map_err(|e| put_failed(key, e))?;

        Ok(())
    }

    async fn abort_multipart_upload(&self, key: &str, upload_id: &str) {
        if let Err(e) = self
            .client
            .abort_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .send()
            .await
        {
            tracing::warn!(
                key = %key,
                upload_id = %upload_id,
                error = %DisplayErrorContext(&e),
                "Failed to abort multipart upload"
            );
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, StoreError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .into_paginator()
            .send();

        let mut objects = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StoreError::List(DisplayErrorContext(&e).to_string()))?;

            for object in page.contents() {
                let (Some(key), Some(last_modified), Some(e_tag)) =
                    (object.key(), object.last_modified(), object.e_tag())
                else {
                    tracing::warn!(key = ?object.key(), "Skipping object with incomplete listing entry");
                    continue;
                };

                let Some(last_modified) = DateTime::<Utc>::from_timestamp(
                    last_modified.secs(),
                    last_modified.subsec_nanos(),
                ) else {
                    tracing::warn!(key = %key, "Skipping object with out-of-range timestamp");
                    continue;
                };

                objects.push(ObjectSummary {
                    key: key.to_string(),
                    last_modified,
                    e_tag: e_tag.to_string(),
                });
            }
        }

        Ok(objects)
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError> {
        let presign_failed = |message: String| StoreError::Presign {
            key: key.to_string(),
            message,
        };

        let presigning =
            PresigningConfig::expires_in(expires_in).map_err(|e| presign_failed(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| presign_failed(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }

    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StoreError> {
        let size = data.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .set_content_type(content_type.map(str::to_owned))
            .send()
            .await
            .map_err(|e| put_failed(key, e))?;

        tracing::debug!(key = %key, size, "Stored object");
        Ok(())
    }

    async fn put_stream(
        &self,
        key: &str,
        body: ByteChunks,
        content_type: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut reader = PartReader::new(body, self.part_size);

        let first = reader.next_part().await?.unwrap_or_default();
        if reader.at_end().await? {
            return self.put_object(key, first, content_type).await;
        }

        let upload_id = self.create_multipart_upload(key, content_type).await?;

        let result = match self.upload_parts(key, &upload_id, first, &mut reader).await {
            Ok(parts) => {
                self.complete_multipart_upload(key, &upload_id, parts)
                    .await
            }
            Err(e) => Err(e),
        };

        if result.is_err() {
            self.abort_multipart_upload(key, &upload_id).await;
        }

        result
    }
}

fn put_failed(key: &str, err: impl std::error::Error) -> StoreError {
    StoreError::Put {
        key: key.to_string(),
        message: DisplayErrorContext(&err).to_string(),
    }
}
