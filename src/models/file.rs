use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored object joined with the text extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub file_name: String,
    pub creation_time: DateTime<Utc>,
    pub text_content: String,
    pub access_url: String,
    pub type_of_file: String,
}
