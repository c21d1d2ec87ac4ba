use crate::config::AppConfig;
use crate::store::{DynamoMetadataStore, MetadataStore, ObjectStore, S3ObjectStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub objects: Arc<dyn ObjectStore>,
    pub metadata: Arc<dyn MetadataStore>,
    pub http: reqwest::Client,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        objects: Arc<dyn ObjectStore>,
        metadata: Arc<dyn MetadataStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            objects,
            metadata,
            http: reqwest::Client::new(),
            start_time: chrono::Utc::now(),
        }
    }

    /// Builds the S3 and DynamoDB clients from the standard AWS environment
    /// (region, credentials, endpoint overrides).
    pub async fn connect(config: AppConfig) -> Self {
        let sdk_config = aws_config::load_from_env().await;
        let objects = Arc::new(S3ObjectStore::new(&sdk_config, config.bucket_name.clone()));
        let metadata = Arc::new(DynamoMetadataStore::new(
            &sdk_config,
            config.table_name.clone(),
        ));
        Self::new(config, objects, metadata)
    }
}
