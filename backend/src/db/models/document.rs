use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub title: String,
    pub classification: String,
    pub subcategory: String,
    /// NULL when the backend never stamped the row.
    pub uploaded_at: Option<DateTime<Utc>>,
    /// Bytes. NULL in the table reads as `None` and counts as 0.
    pub size: Option<u64>,
    pub status: DocumentStatus,
}

/// Processing state written by the backend. Unknown labels are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentStatus {
    Processed,
    Processing,
    Error,
    Other(String),
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Processed => write!(f, "processed"),
            DocumentStatus::Processing => write!(f, "processing"),
            DocumentStatus::Error => write!(f, "error"),
            DocumentStatus::Other(label) => write!(f, "{label}"),
        }
    }
}

impl From<&str> for DocumentStatus {
    fn from(value: &str) -> Self {
        match value {
            "processed" => DocumentStatus::Processed,
            "processing" => DocumentStatus::Processing,
            "error" => DocumentStatus::Error,
            other => DocumentStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for DocumentStatus {
    fn from(value: String) -> Self {
        DocumentStatus::from(value.as_str())
    }
}

impl From<DocumentStatus> for String {
    fn from(status: DocumentStatus) -> Self {
        status.to_string()
    }
}

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Every document, newest upload first.
    pub async fn list_recent(&self) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            "SELECT id::text AS id,
                    COALESCE(filename, '') AS filename,
                    COALESCE(title, '') AS title,
                    COALESCE(classification, '') AS classification,
                    COALESCE(subcategory, '') AS subcategory,
                    uploaded_at::timestamptz AS uploaded_at,
                    size::bigint AS size,
                    COALESCE(status, '') AS status
             FROM documents ORDER BY uploaded_at DESC NULLS LAST",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list documents")?;

        rows.iter().map(Self::map_row).collect()
    }

    /// The `size` column of every row, in no particular order.
    pub async fn list_sizes(&self) -> Result<Vec<Option<u64>>> {
        let rows = sqlx::query("SELECT size::bigint AS size FROM documents")
            .fetch_all(&self.pool)
            .await
            .context("Failed to read document sizes")?;

        rows.iter()
            .map(|r| {
                let size: Option<i64> = r.try_get("size").context("Failed to get size")?;
                Ok(size.map(non_negative))
            })
            .collect()
    }

    fn map_row(row: &sqlx::postgres::PgRow) -> Result<Document> {
        let status: String = row.try_get("status").context("Failed to get status")?;
        let size: Option<i64> = row.try_get("size").context("Failed to get size")?;

        Ok(Document {
            id: row.try_get("id").context("Failed to get id")?,
            filename: row.try_get("filename").context("Failed to get filename")?,
            title: row.try_get("title").context("Failed to get title")?,
            classification: row
                .try_get("classification")
                .context("Failed to get classification")?,
            subcategory: row
                .try_get("subcategory")
                .context("Failed to get subcategory")?,
            uploaded_at: row
                .try_get("uploaded_at")
                .context("Failed to get uploaded_at")?,
            size: size.map(non_negative),
            status: DocumentStatus::from(status),
        })
    }
}

fn non_negative(size: i64) -> u64 {
    u64::try_from(size).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_known_labels() {
        for label in ["processed", "processing", "error"] {
            assert_eq!(DocumentStatus::from(label).to_string(), label);
        }
        assert_eq!(DocumentStatus::from("error"), DocumentStatus::Error);
    }

    #[test]
    fn test_status_keeps_unknown_label() {
        let status = DocumentStatus::from("queued");
        assert_eq!(status, DocumentStatus::Other("queued".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"queued\"");
    }

    #[test]
    fn test_negative_size_clamps_to_zero() {
        assert_eq!(non_negative(-5), 0);
        assert_eq!(non_negative(2048), 2048);
    }
}
