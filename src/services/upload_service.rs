use futures::{StreamExt, TryStreamExt};
use reqwest::header::CONTENT_TYPE;

use crate::error::AppError;
use crate::models::upload::UploadedFile;
use crate::state::AppState;
use crate::store::StoreError;

/// Leading characters dropped from a source URL's last path segment to get
/// the stored key. Upstream names uploads `<10-char id>-<original name>`;
/// any other naming scheme produces a truncated or empty key.
pub const SOURCE_PREFIX_LEN: usize = 11;

const UPLOAD_FAILED: &str = "failed to upload file";

pub fn object_key_from_url(url: &str) -> Option<String> {
    let segment = url.rsplit('/').next().unwrap_or(url);
    let key: String = segment.chars().skip(SOURCE_PREFIX_LEN).collect();
    (!key.is_empty()).then_some(key)
}

/// Fetches each URL in order and streams it into the bucket. The first
/// fetch that fails aborts the batch; keys stored before it stay stored.
pub async fn upload_from_urls(state: &AppState, urls: &[String]) -> Result<Vec<String>, AppError> {
    if urls.is_empty() {
        return Err(AppError::BadRequest("No URLs provided".into()));
    }

    let mut stored = Vec::with_capacity(urls.len());

    for url in urls {
        let key = object_key_from_url(url)
            .ok_or_else(|| AppError::BadRequest(format!("Cannot derive object key from URL: {url}")))?;

        let response = match state.http.get(url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(url = %url, status = %response.status(), "Remote fetch failed");
                return Err(AppError::BadRequest(UPLOAD_FAILED.into()));
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Remote fetch failed");
                return Err(AppError::BadRequest(UPLOAD_FAILED.into()));
            }
        };

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response
            .bytes_stream()
            .map_err(|e| StoreError::Body(e.to_string()))
            .boxed();

        state
            .objects
            .put_stream(&key, body, content_type.as_deref())
            .await?;

        tracing::info!(key = %key, url = %url, "Uploaded file from URL");
        stored.push(key);
    }

    Ok(stored)
}

/// Stores each file under its original name. A file the store rejects is
/// logged and skipped; the result is the number of files stored.
pub async fn upload_files(state: &AppState, files: Vec<UploadedFile>) -> Result<usize, AppError> {
    if files.is_empty() {
        return Err(AppError::BadRequest("No files provided".into()));
    }

    let mut stored = 0;

    for file in files {
        let size = file.data.len();
        match state
            .objects
            .put_object(&file.file_name, file.data, file.content_type.as_deref())
            .await
        {
            Ok(()) => {
                tracing::info!(key = %file.file_name, size, "Uploaded file");
                stored += 1;
            }
            Err(e) => {
                tracing::error!(key = %file.file_name, error = %e, "Failed to store uploaded file");
            }
        }
    }

    Ok(stored)
}
