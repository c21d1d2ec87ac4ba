use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use super::{MetadataStore, StoreError};

const HASH_ATTRIBUTE: &str = "ETag";
const TEXT_ATTRIBUTE: &str = "TextContent";

pub struct DynamoMetadataStore {
    client: Client,
    table: String,
}

impl DynamoMetadataStore {
    pub fn new(config: &aws_config::SdkConfig, table: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            table: table.into(),
        }
    }
}

#[async_trait]
impl MetadataStore for DynamoMetadataStore {
    async fn text_content(&self, content_hash: &str) -> Result<Option<String>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(HASH_ATTRIBUTE, AttributeValue::S(content_hash.to_owned()))
            .projection_expression(TEXT_ATTRIBUTE)
            .send()
            .await
            .map_err(|e| StoreError::Lookup(DisplayErrorContext(&e).to_string()))?;

        let text = output
            .item()
            .and_then(|item| item.get(TEXT_ATTRIBUTE))
            .and_then(|value| value.as_s().ok())
            .cloned();

        tracing::debug!(
            content_hash = %content_hash,
            found = text.is_some(),
            "Metadata lookup"
        );

        Ok(text)
    }
}
