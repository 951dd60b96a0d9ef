use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct StoredFileResponse {
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum UploadOutcome {
    /// `filename` is the name the backend stored the file under.
    Uploaded { original: String, filename: String },
    Rejected { original: String, reason: String },
    Failed { original: String, reason: String },
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub files: Vec<UploadOutcome>,
    pub uploaded: usize,
}
