use axum::{
    extract::{Query, State},
    Json,
};

use crate::dto::document::{
    DocumentListResponse, DocumentQuery, DocumentResponse, StorageStatsResponse,
};
use crate::errors::AppError;
use crate::services::{document_filter, storage_stats};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let docs = state.document_repo.list_recent().await?;
    let total = docs.len();

    let documents: Vec<DocumentResponse> =
        document_filter::filter(&docs, &query.search, &query.classification)
            .into_iter()
            .map(|doc| DocumentResponse::new(doc, &state.storage))
            .collect();

    Ok(Json(DocumentListResponse {
        shown: documents.len(),
        total,
        documents,
    }))
}

pub async fn storage_stats(
    State(state): State<AppState>,
) -> Result<Json<StorageStatsResponse>, AppError> {
    let sizes = state.document_repo.list_sizes().await?;
    Ok(Json(storage_stats::aggregate(sizes).into()))
}
