use async_trait::async_trait;

use super::StoreError;

#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Looks up the text extracted from the object with the given content
    /// hash. A hash with no entry is `Ok(None)`.
    async fn text_content(&self, content_hash: &str) -> Result<Option<String>, StoreError>;
}
