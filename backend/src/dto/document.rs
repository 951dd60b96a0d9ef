use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::document::{Document, DocumentStatus};
use crate::services::document_filter::ALL_CATEGORIES;
use crate::services::storage::StorageService;
use crate::services::storage_stats::{format_bytes, format_size, StorageStats};

#[derive(Debug, Deserialize)]
pub struct DocumentQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default = "all_categories")]
    pub classification: String,
}

fn all_categories() -> String {
    ALL_CATEGORIES.to_string()
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: String,
    pub filename: String,
    pub title: String,
    pub classification: String,
    pub subcategory: String,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub size: u64,
    pub size_display: String,
    pub status: DocumentStatus,
    pub download_url: String,
}

impl DocumentResponse {
    pub fn new(doc: Document, storage: &StorageService) -> Self {
        let size = doc.size.unwrap_or(0);
        let download_url = storage.public_url(&doc.filename);

        Self {
            id: doc.id,
            filename: doc.filename,
            title: doc.title,
            classification: doc.classification,
            subcategory: doc.subcategory,
            uploaded_at: doc.uploaded_at,
            size,
            size_display: format_size(size),
            status: doc.status,
            download_url,
        }
    }
}

/// Filtered library page. `shown` of `total` documents matched.
#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentResponse>,
    pub shown: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct StorageStatsResponse {
    pub total_bytes: u64,
    pub count: usize,
    pub total_display: String,
}

impl From<StorageStats> for StorageStatsResponse {
    fn from(stats: StorageStats) -> Self {
        Self {
            total_bytes: stats.total_bytes,
            count: stats.count,
            total_display: format_bytes(stats.total_bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use chrono::TimeZone;

    #[test]
    fn test_document_response_derives_display_fields() {
        let storage = StorageService::new(&StorageConfig {
            public_url: "https://project.supabase.co".to_string(),
            bucket: "cloud".to_string(),
        })
        .unwrap();

        let doc = Document {
            id: "7".to_string(),
            filename: "q1 report.pdf".to_string(),
            title: "Budget Report".to_string(),
            classification: "Business".to_string(),
            subcategory: "Reports".to_string(),
            uploaded_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()),
            size: None,
            status: DocumentStatus::Processing,
        };

        let response = DocumentResponse::new(doc, &storage);
        assert_eq!(response.size, 0);
        assert_eq!(response.size_display, "0.00 B");
        assert_eq!(
            response.download_url,
            "https://project.supabase.co/storage/v1/object/public/cloud/q1%20report.pdf"
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "processing");
        assert_eq!(json["uploaded_at"], "2025-03-01T12:00:00Z");
    }

    #[test]
    fn test_query_defaults_to_everything() {
        let query: DocumentQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.search, "");
        assert_eq!(query.classification, ALL_CATEGORIES);
    }

    #[test]
    fn test_document_without_upload_time_still_renders() {
        let storage = StorageService::new(&StorageConfig {
            public_url: "https://project.supabase.co".to_string(),
            bucket: "cloud".to_string(),
        })
        .unwrap();

        let doc = Document {
            id: "8".to_string(),
            filename: "ml.pdf".to_string(),
            title: "ML Notes".to_string(),
            classification: "Education".to_string(),
            subcategory: String::new(),
            uploaded_at: None,
            size: Some(512),
            status: DocumentStatus::Processed,
        };

        let json = serde_json::to_value(DocumentResponse::new(doc, &storage)).unwrap();
        assert!(json["uploaded_at"].is_null());
        assert_eq!(json["size_display"], "512.00 B");
    }
}
