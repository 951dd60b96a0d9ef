use std::collections::HashSet;

use serde::Serialize;

use crate::dto::classification::ClassificationResult;

/// Seconds shown per classified document. Not measured.
const SIMULATED_SECONDS_PER_DOCUMENT: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationStats {
    pub total: usize,
    /// `None` when there are no results.
    pub avg_confidence: Option<f64>,
    pub distinct_categories: usize,
    /// Display placeholder derived from `total`, never an observed latency.
    pub avg_process_time: f64,
}

impl ClassificationStats {
    pub fn avg_confidence_display(&self) -> String {
        match self.avg_confidence {
            Some(avg) => format!("{avg:.1}%"),
            None => "—".to_string(),
        }
    }

    pub fn avg_process_time_display(&self) -> String {
        format!("{:.1}s", self.avg_process_time)
    }
}

pub fn aggregate(results: &[ClassificationResult]) -> ClassificationStats {
    let total = results.len();

    let avg_confidence = (total > 0).then(|| {
        let sum: f64 = results.iter().map(|r| r.confidence).sum();
        round_one_decimal(sum / total as f64)
    });

    let distinct_categories = results
        .iter()
        .map(|r| r.predicted_category.as_str())
        .collect::<HashSet<_>>()
        .len();

    ClassificationStats {
        total,
        avg_confidence,
        distinct_categories,
        avg_process_time: round_one_decimal(total as f64 * SIMULATED_SECONDS_PER_DOCUMENT),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
