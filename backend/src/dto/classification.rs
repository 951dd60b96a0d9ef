use serde::{Deserialize, Serialize};

/// One prediction returned by the backend's `/classify` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub id: String,
    pub title: String,
    pub filename: String,
    pub status: String,
    pub predicted_category: String,
    pub predicted_subcategory: String,
    /// Percentage, 0 to 100 inclusive.
    pub confidence: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Coarse grouping of a 0-100 score, used for colouring in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 90.0 {
            ScoreBand::High
        } else if score >= 70.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationView {
    #[serde(flatten)]
    pub result: ClassificationResult,
    pub confidence_band: ScoreBand,
}

impl From<ClassificationResult> for ClassificationView {
    fn from(result: ClassificationResult) -> Self {
        let confidence_band = ScoreBand::of(result.confidence);
        Self {
            result,
            confidence_band,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(ScoreBand::of(100.0), ScoreBand::High);
        assert_eq!(ScoreBand::of(90.0), ScoreBand::High);
        assert_eq!(ScoreBand::of(89.9), ScoreBand::Medium);
        assert_eq!(ScoreBand::of(70.0), ScoreBand::Medium);
        assert_eq!(ScoreBand::of(69.9), ScoreBand::Low);
        assert_eq!(ScoreBand::of(0.0), ScoreBand::Low);
    }

    #[test]
    fn test_deserializes_backend_shape() {
        let json = r#"{
            "id": "d1",
            "title": "Budget Report",
            "filename": "q1.pdf",
            "status": "classified",
            "predictedCategory": "Business",
            "predictedSubcategory": "Reports",
            "confidence": 92
        }"#;

        let result: ClassificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.predicted_category, "Business");
        assert_eq!(result.confidence, 92.0);
        assert!(result.keywords.is_empty());

        let view = serde_json::to_value(ClassificationView::from(result)).unwrap();
        assert_eq!(view["confidenceBand"], "high");
        assert_eq!(view["predictedSubcategory"], "Reports");
    }
}
