pub mod classify;
pub mod documents;
pub mod health;
pub mod search;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::services::upload_policy::MAX_REQUEST_SIZE;
use crate::state::AppState;

/// JSON API under `/api`, plus the UI bundle as fallback when `server.static_dir` is set.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/documents", get(documents::list))
        .route("/api/storage/stats", get(documents::storage_stats))
        .route(
            "/api/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(MAX_REQUEST_SIZE)),
        )
        .route("/api/scrape", post(upload::scrape))
        .route("/api/search", post(search::search))
        .route("/api/taxonomy", get(classify::get_taxonomy))
        .route("/api/classify", post(classify::start).get(classify::status))
        .route("/api/classify/events", get(classify::events));

    let app = match &state.config.server.static_dir {
        Some(dir) => {
            // client-side routes fall through to the SPA entry point
            let index = format!("{}/index.html", dir.trim_end_matches('/'));
            api.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => api,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
