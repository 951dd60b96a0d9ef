use std::time::Duration;

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::BackendConfig;
use crate::dto::classification::ClassificationResult;
use crate::dto::search::SearchResult;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status. `message` is whatever the backend put in `error`.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("unexpected response from backend: {0}")]
    Decode(String),
}

impl BackendError {
    /// The reason shown to the user: the backend's own message when it gave one.
    pub fn reason(&self) -> String {
        match self {
            BackendError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StoredFile {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct ResultsBody<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

/// Client for the document backend (`/upload`, `/scrape`, `/search`, `/classify`).
/// One request per call, no retries.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base: Url,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let mut base = Url::parse(&config.url).context("Invalid backend URL")?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self { client, base })
    }

    /// Sends one file as multipart field `file`. Returns the stored filename.
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, BackendError> {
        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let resp = self.client.post(self.endpoint("upload")?).multipart(form).send().await?;
        let stored: StoredFile = Self::decode(resp).await?;
        Ok(stored.filename)
    }

    /// Asks the backend to fetch and store the document at `url`.
    pub async fn scrape(&self, url: &str) -> Result<String, BackendError> {
        let resp = self
            .client
            .post(self.endpoint("scrape")?)
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;
        let stored: StoredFile = Self::decode(resp).await?;
        Ok(stored.filename)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, BackendError> {
        let resp = self
            .client
            .post(self.endpoint("search")?)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        let body: ResultsBody<SearchResult> = Self::decode(resp).await?;
        Ok(body.results)
    }

    pub async fn classify(&self) -> Result<Vec<ClassificationResult>, BackendError> {
        let resp = self.client.post(self.endpoint("classify")?).send().await?;
        let body: ResultsBody<ClassificationResult> = Self::decode(resp).await?;
        Ok(body.results)
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base
            .join(path)
            .map_err(|e| BackendError::Decode(format!("invalid endpoint {path}: {e}")))
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, BackendError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown backend error")
                        .to_string()
                });
            return Err(BackendError::Rejected { status, message });
        }

        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Multipart;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn spawn_stub(router: Router) -> BackendClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        BackendClient::new(&BackendConfig {
            url: format!("http://{addr}"),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_sends_file_field() {
        let router = Router::new().route(
            "/upload",
            post(|mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                assert_eq!(field.name(), Some("file"));
                let name = field.file_name().unwrap().to_string();
                let data = field.bytes().await.unwrap();
                assert_eq!(&data[..], b"%PDF-1.4");
                Json(json!({ "filename": format!("stored-{name}") }))
            }),
        );
        let client = spawn_stub(router).await;

        let stored = client
            .upload("q1.pdf", "application/pdf", b"%PDF-1.4".to_vec())
            .await
            .unwrap();
        assert_eq!(stored, "stored-q1.pdf");
    }

    #[tokio::test]
    async fn test_rejection_carries_backend_message() {
        let router = Router::new().route(
            "/scrape",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["url"], "https://example.com/paper.pdf");
                (
                    AxumStatus::UNPROCESSABLE_ENTITY,
                    Json(json!({ "error": "Unsupported file type" })),
                )
            }),
        );
        let client = spawn_stub(router).await;

        let err = client.scrape("https://example.com/paper.pdf").await.unwrap_err();
        match &err {
            BackendError::Rejected { status, message } => {
                assert_eq!(*status, StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(message, "Unsupported file type");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(err.reason(), "Unsupported file type");
    }

    #[tokio::test]
    async fn test_rejection_without_error_body_uses_status() {
        let router = Router::new().route(
            "/classify",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "oops") }),
        );
        let client = spawn_stub(router).await;

        let err = client.classify().await.unwrap_err();
        assert_eq!(err.reason(), "Internal Server Error");
    }

    #[tokio::test]
    async fn test_search_decodes_results() {
        let router = Router::new().route(
            "/search",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["query"], "budget");
                Json(json!({
                    "results": [{
                        "id": "1",
                        "title": "Budget Report",
                        "filename": "q1.pdf",
                        "highlightedPreview": "the <mark>budget</mark> for Q1",
                        "matchedKeywords": ["budget"],
                        "uploadDate": "2025-03-01T12:00:00Z",
                        "relevanceScore": 87.5
                    }]
                }))
            }),
        );
        let client = spawn_stub(router).await;

        let results = client.search("budget").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_keywords, vec!["budget"]);
        assert_eq!(results[0].relevance_score, Some(87.5));
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let router = Router::new().route(
            "/api/classify",
            post(|| async { Json(json!({ "results": [] })) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = BackendClient::new(&BackendConfig {
            url: format!("http://{addr}/api"),
            request_timeout_secs: 5,
        })
        .unwrap();
        assert!(client.classify().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = BackendClient::new(&BackendConfig {
            url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 2,
        })
        .unwrap();

        let err = client.search("anything").await.unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }
}
