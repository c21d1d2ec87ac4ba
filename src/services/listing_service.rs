use std::time::Duration;

use crate::models::file::FileRecord;
use crate::state::AppState;
use crate::store::{ObjectSummary, StoreError};

const UNKNOWN_TYPE: &str = "unknown";

/// Lists the bucket and returns one record per object that has extracted
/// text. Failures never reach the caller: a failed listing is an empty
/// result and a failed lookup or presign drops only that object.
pub async fn list_available_files(state: &AppState) -> Vec<FileRecord> {
    let objects = match state.objects.list_objects().await {
        Ok(objects) => objects,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list bucket");
            return Vec::new();
        }
    };

    if objects.is_empty() {
        tracing::info!(bucket = %state.config.bucket_name, "No files found in bucket");
        return Vec::new();
    }

    let expiry = state.config.presign_expiry();
    let total = objects.len();
    let mut records = Vec::new();

    for object in &objects {
        match enrich(state, object, expiry).await {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {
                tracing::debug!(key = %object.key, "No extracted text for object");
            }
            Err(e) => {
                tracing::warn!(key = %object.key, error = %e, "Failed to enrich object");
            }
        }
    }

    tracing::info!(total, matched = records.len(), "Listed files");
    records
}

async fn enrich(
    state: &AppState,
    object: &ObjectSummary,
    expiry: Duration,
) -> Result<Option<FileRecord>, StoreError> {
    let text_content = state
        .metadata
        .text_content(strip_quotes(&object.e_tag))
        .await?
        .filter(|text| !text.is_empty());

    let Some(text_content) = text_content else {
        return Ok(None);
    };

    let access_url = state.objects.presign_get(&object.key, expiry).await?;

    Ok(Some(FileRecord {
        file_name: object.key.clone(),
        creation_time: object.last_modified,
        text_content,
        access_url,
        type_of_file: mime_type_for(&object.key),
    }))
}

/// ETags come back wrapped in double quotes; the metadata table is keyed by
/// the bare hash.
pub fn strip_quotes(e_tag: &str) -> &str {
    let e_tag = e_tag.strip_prefix('"').unwrap_or(e_tag);
    e_tag.strip_suffix('"').unwrap_or(e_tag)
}

pub fn mime_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
}
