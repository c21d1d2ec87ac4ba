//! Clients for the two managed services behind the API: the object store
//! holding uploaded files and the metadata table holding extracted text.

pub mod dynamo;
pub mod metadata;
pub mod object;
pub mod parts;
pub mod s3;

pub use dynamo::DynamoMetadataStore;
pub use metadata::MetadataStore;
pub use object::{ByteChunks, ObjectStore, ObjectSummary};
pub use s3::S3ObjectStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to list objects: {0}")]
    List(String),

    #[error("Failed to presign URL for {key}: {message}")]
    Presign { key: String, message: String },

    #[error("Failed to store object {key}: {message}")]
    Put { key: String, message: String },

    #[error("Metadata lookup failed: {0}")]
    Lookup(String),

    #[error("Failed to read upload body: {0}")]
    Body(String),
}
