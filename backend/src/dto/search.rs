use serde::{Deserialize, Serialize};

use crate::dto::classification::ScoreBand;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub filename: String,
    /// HTML fragment with the matched keywords highlighted by the backend.
    #[serde(default)]
    pub highlighted_preview: String,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    pub result: SearchResult,
    pub relevance_band: ScoreBand,
}

impl From<SearchResult> for SearchHit {
    fn from(result: SearchResult) -> Self {
        let relevance_band = ScoreBand::of(result.relevance_score.unwrap_or(0.0));
        Self {
            result,
            relevance_band,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub count: usize,
    pub search_time_ms: u64,
}
