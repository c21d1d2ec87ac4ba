use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UploadUrlsRequest {
    #[serde(default)]
    pub urls: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadFilesResponse {
    pub message: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A file part read from a multipart request.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}
