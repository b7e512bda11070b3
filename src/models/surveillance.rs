//! Symptom surveillance outputs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How strongly a flagged symptom deviates from its baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// z-score above the anomaly threshold (≈95% one-sided)
    Moderate,
    /// z-score above the high threshold (≈99.9% one-sided)
    High,
}

/// Frequency statistics of one symptom over the lookback window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomClusterStat {
    pub symptom: String,
    /// Reports naming the symptom on each day of the window, oldest first
    pub daily_counts: Vec<u32>,
    /// Mean daily count over the window
    pub baseline_mean: f64,
    /// Standard deviation of the daily count over the window
    pub baseline_std: f64,
    /// Mean daily count over the most recent days
    pub recent_mean: f64,
    pub z_score: f64,
    /// One-sided p-value of the z-score under a standard normal
    pub p_value: f64,
    pub significance: Significance,
}

/// Whether detection could run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnomalyStatus {
    /// Detection ran over the full window
    Completed,
    /// Too few reports for the location
    InsufficientData {
        reports_found: usize,
        required: usize,
    },
}

/// Result of one anomaly detection request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub location: String,
    /// Last day of the window
    pub as_of: NaiveDate,
    pub lookback_days: u32,
    /// Reports for the location inside the window
    pub total_reports: usize,
    /// Distinct symptoms seen in the window
    pub symptoms_analyzed: usize,
    pub status: AnomalyStatus,
    /// Flagged symptoms, strongest first
    pub anomalies: Vec<SymptomClusterStat>,
}

impl AnomalyReport {
    /// Whether any symptom was flagged
    #[must_use]
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}
