#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use futures::TryStreamExt;
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use textscan::config::AppConfig;
use textscan::state::AppState;
use textscan::store::{ByteChunks, MetadataStore, ObjectStore, ObjectSummary, StoreError};

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: Option<String>,
}

/// Bucket double: a fixed listing plus a map of whatever gets written.
#[derive(Default)]
pub struct MemoryObjectStore {
    listing: Vec<ObjectSummary>,
    fail_listing: bool,
    fail_presign: HashSet<String>,
    fail_put: HashSet<String>,
    stored: Mutex<BTreeMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, key: &str, e_tag: &str) -> Self {
        self.listing.push(ObjectSummary {
            key: key.to_string(),
            last_modified: last_modified(),
            e_tag: e_tag.to_string(),
        });
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_presign(mut self, key: &str) -> Self {
        self.fail_presign.insert(key.to_string());
        self
    }

    pub fn failing_put(mut self, key: &str) -> Self {
        self.fail_put.insert(key.to_string());
        self
    }

    pub fn stored(&self, key: &str) -> Option<StoredObject> {
        self.stored.lock().unwrap().get(key).cloned()
    }

    pub fn stored_keys(&self) -> Vec<String> {
        self.stored.lock().unwrap().keys().cloned().collect()
    }

    fn store(&self, key: &str, data: Bytes, content_type: Option<&str>) -> Result<(), StoreError> {
        if self.fail_put.contains(key) {
            return Err(StoreError::Put {
                key: key.to_string(),
                message: "simulated failure".into(),
            });
        }
        self.stored.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.map(str::to_owned),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, StoreError> {
        if self.fail_listing {
            return Err(StoreError::List("bucket unreachable".into()));
        }
        Ok(self.listing.clone())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StoreError> {
        if self.fail_presign.contains(key) {
            return Err(StoreError::Presign {
                key: key.to_string(),
                message: "simulated failure".into(),
            });
        }
        Ok(format!(
            "https://bucket.example/{}?X-Amz-Expires={}",
            key,
            expires_in.as_secs()
        ))
    }

    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), StoreError> {
        self.store(key, data, content_type)
    }

    async fn put_stream(
        &self,
        key: &str,
        body: ByteChunks,
        content_type: Option<&str>,
    ) -> Result<(), StoreError> {
        let chunks: Vec<Bytes> = body.try_collect().await?;
        self.store(key, Bytes::from(chunks.concat()), content_type)
    }
}

/// Metadata table double keyed by bare content hash.
#[derive(Default)]
pub struct MemoryMetadataStore {
    texts: HashMap<String, String>,
    failing: HashSet<String>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, content_hash: &str, text: &str) -> Self {
        self.texts.insert(content_hash.to_string(), text.to_string());
        self
    }

    pub fn failing(mut self, content_hash: &str) -> Self {
        self.failing.insert(content_hash.to_string());
        self
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn text_content(&self, content_hash: &str) -> Result<Option<String>, StoreError> {
        if self.failing.contains(content_hash) {
            return Err(StoreError::Lookup("simulated failure".into()));
        }
        Ok(self.texts.get(content_hash).cloned())
    }
}

pub fn last_modified() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 29, 10, 28, 19).unwrap()
}

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        bucket_name: "test-bucket".to_string(),
        table_name: "TestTable".to_string(),
        presign_expiry_secs: 3600,
        max_upload_size: 1_048_576,
        log_level: "error".to_string(),
    }
}

pub fn setup(
    objects: MemoryObjectStore,
    metadata: MemoryMetadataStore,
) -> (AppState, Arc<MemoryObjectStore>) {
    let objects = Arc::new(objects);
    let state = AppState::new(test_config(), objects.clone(), Arc::new(metadata));
    (state, objects)
}

pub async fn body_to_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
