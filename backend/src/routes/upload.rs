use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::dto::upload::{ScrapeRequest, StoredFileResponse, UploadOutcome, UploadResponse};
use crate::errors::AppError;
use crate::services::upload_policy;
use crate::state::AppState;

/// Forwards every `file` field to the backend, one request per file.
/// Each file gets its own outcome; one failure does not stop the rest.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart data: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original = field.file_name().unwrap_or("unnamed").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

        if let Some(reason) = upload_policy::rejection_reason(&content_type, &original, data.len()) {
            tracing::warn!("Rejected upload '{original}': {reason}");
            files.push(UploadOutcome::Rejected { original, reason });
            continue;
        }

        let outcome = match state
            .backend
            .upload(&original, &content_type, data.to_vec())
            .await
        {
            Ok(filename) => {
                tracing::info!("Uploaded '{original}' as '{filename}'");
                UploadOutcome::Uploaded { original, filename }
            }
            Err(e) => {
                tracing::error!("Upload of '{original}' failed: {e}");
                UploadOutcome::Failed {
                    original,
                    reason: e.reason(),
                }
            }
        };
        files.push(outcome);
    }

    if files.is_empty() {
        return Err(AppError::Validation("No files selected".to_string()));
    }

    let uploaded = files
        .iter()
        .filter(|f| matches!(f, UploadOutcome::Uploaded { .. }))
        .count();

    Ok(Json(UploadResponse { files, uploaded }))
}

pub async fn scrape(
    State(state): State<AppState>,
    Json(payload): Json<ScrapeRequest>,
) -> Result<Json<StoredFileResponse>, AppError> {
    if payload.url.trim().is_empty() {
        return Err(AppError::Validation("URL is required".to_string()));
    }

    url::Url::parse(&payload.url)
        .map_err(|_| AppError::Validation("Invalid URL".to_string()))?;

    let filename = state
        .backend
        .scrape(&payload.url)
        .await
        .map_err(|e| AppError::Upstream(e.reason()))?;

    tracing::info!("Scraped {} into '{filename}'", payload.url);
    Ok(Json(StoredFileResponse { filename }))
}
