use std::convert::Infallible;

use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream};
use serde::Serialize;

use crate::errors::AppError;
use crate::services::classification_run::ClassificationSnapshot;
use crate::services::taxonomy::{self, Category, ALGORITHM_LABEL};
use crate::state::AppState;

pub async fn start(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ClassificationSnapshot>), AppError> {
    if state
        .classification
        .start(state.backend.clone())
        .is_none()
    {
        return Err(AppError::Conflict(
            "Classification is already running".to_string(),
        ));
    }

    Ok((StatusCode::ACCEPTED, Json(state.classification.snapshot())))
}

pub async fn status(State(state): State<AppState>) -> Json<ClassificationSnapshot> {
    Json(state.classification.snapshot())
}

/// Streams `progress` events until the session is idle and the run's results
/// (or its failure) are in. A client that connects while settled gets a single event.
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.classification.subscribe();

    let stream = stream::unfold((rx, true, false), |(mut rx, first, done)| async move {
        if done {
            return None;
        }
        if !first && rx.changed().await.is_err() {
            return None;
        }

        let (snapshot, finished) = {
            let state = rx.borrow_and_update();
            (ClassificationSnapshot::from(&*state), state.is_settled())
        };
        let event = match Event::default().event("progress").json_data(&snapshot) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!("Failed to encode classification snapshot: {e}");
                return None;
            }
        };

        Some((Ok(event), (rx, false, finished)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Serialize)]
pub struct TaxonomyResponse {
    pub algorithm: &'static str,
    pub categories: Vec<Category>,
    pub filter_categories: Vec<&'static str>,
}

pub async fn get_taxonomy() -> Json<TaxonomyResponse> {
    Json(TaxonomyResponse {
        algorithm: ALGORITHM_LABEL,
        categories: taxonomy::classification_tree(),
        filter_categories: taxonomy::filter_categories(),
    })
}
