use std::time::Instant;

use axum::{extract::State, Json};

use crate::dto::search::{SearchHit, SearchRequest, SearchResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// Forwards a keyword search. A failed backend call is logged and answered
/// with an empty result list, never an error.
pub async fn search(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = payload.query.as_str();
    if query.trim().is_empty() {
        return Err(AppError::Validation("Search query is required".to_string()));
    }

    let started = Instant::now();
    let outcome = state.backend.search(query).await;
    let search_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let results: Vec<SearchHit> = match outcome {
        Ok(results) => results.into_iter().map(SearchHit::from).collect(),
        Err(e) => {
            tracing::error!("Search error for {query:?}: {e}");
            Vec::new()
        }
    };

    Ok(Json(SearchResponse {
        count: results.len(),
        results,
        search_time_ms,
    }))
}
