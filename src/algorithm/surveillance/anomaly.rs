//! Z-score anomaly detection on daily symptom counts
//!
//! Reports are bucketed per symptom and per day over the lookback window,
//! with days without reports counted as zero. A symptom is anomalous when the
//! mean of its last few days sits more than two standard deviations above
//! its window mean.

use chrono::{Days, NaiveDate};
use itertools::Itertools;
use log::{debug, info};
use rustc_hash::FxHashMap;

use super::stats::{mean, normal_survival, population_std_dev};
use crate::config::SurveillanceConfig;
use crate::models::{AnomalyReport, AnomalyStatus, Significance, SymptomClusterStat, SymptomReport};

/// Detects unusual symptom clustering at a location
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    config: SurveillanceConfig,
}

impl AnomalyDetector {
    /// Create a detector with the given configuration
    #[must_use]
    pub const fn new(config: SurveillanceConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &SurveillanceConfig {
        &self.config
    }

    /// Detect anomalies using the configured lookback window
    #[must_use]
    pub fn detect_default_window(
        &self,
        location: &str,
        reports: &[SymptomReport],
        as_of: NaiveDate,
    ) -> AnomalyReport {
        self.detect(location, reports, self.config.lookback_days, as_of)
    }

    /// Detect anomalies in the `lookback_days` days ending on `as_of`
    ///
    /// Only reports for `location` dated inside the window are considered.
    /// Fewer than the configured minimum yields an insufficient-data status.
    #[must_use]
    pub fn detect(
        &self,
        location: &str,
        reports: &[SymptomReport],
        lookback_days: u32,
        as_of: NaiveDate,
    ) -> AnomalyReport {
        let lookback = lookback_days.max(1);
        let window_start = as_of
            .checked_sub_days(Days::new(u64::from(lookback - 1)))
            .unwrap_or(NaiveDate::MIN);

        let in_window = reports
            .iter()
            .filter(|r| r.location == location && r.reported_on >= window_start && r.reported_on <= as_of)
            .collect_vec();

        let mut report = AnomalyReport {
            location: location.to_string(),
            as_of,
            lookback_days: lookback,
            total_reports: in_window.len(),
            symptoms_analyzed: 0,
            status: AnomalyStatus::Completed,
            anomalies: Vec::new(),
        };

        if in_window.len() < self.config.min_reports {
            info!(
                "Skipping anomaly detection for {location}: {} reports, {} required",
                in_window.len(),
                self.config.min_reports
            );
            report.status = AnomalyStatus::InsufficientData {
                reports_found: in_window.len(),
                required: self.config.min_reports,
            };
            return report;
        }

        let daily = daily_counts(&in_window, window_start, lookback as usize);
        report.symptoms_analyzed = daily.len();

        report.anomalies = daily
            .into_iter()
            .filter_map(|(symptom, counts)| self.score(symptom, counts))
            .sorted_by(|a, b| b.z_score.total_cmp(&a.z_score).then_with(|| a.symptom.cmp(&b.symptom)))
            .collect();

        debug!(
            "{location}: {} of {} symptoms anomalous over {lookback} days",
            report.anomalies.len(),
            report.symptoms_analyzed
        );
        report
    }

    /// Statistics for one symptom, if it is anomalous
    fn score(&self, symptom: String, counts: Vec<u32>) -> Option<SymptomClusterStat> {
        let values = counts.iter().map(|&c| f64::from(c)).collect_vec();
        let baseline_mean = mean(&values);
        let baseline_std = population_std_dev(&values);

        // A constant series carries no signal
        if baseline_std <= f64::EPSILON {
            return None;
        }

        let recent = (self.config.recent_window_days.max(1) as usize).min(values.len());
        let recent_mean = mean(&values[values.len() - recent..]);
        let z_score = (recent_mean - baseline_mean) / baseline_std;

        if z_score <= self.config.anomaly_z {
            return None;
        }

        let significance = if z_score > self.config.high_z {
            Significance::High
        } else {
            Significance::Moderate
        };

        Some(SymptomClusterStat {
            symptom,
            daily_counts: counts,
            baseline_mean,
            baseline_std,
            recent_mean,
            z_score,
            p_value: normal_survival(z_score),
            significance,
        })
    }
}

/// Detect anomalies with the default configuration
#[must_use]
pub fn detect_anomalies(
    location: &str,
    reports: &[SymptomReport],
    lookback_days: u32,
    as_of: NaiveDate,
) -> AnomalyReport {
    AnomalyDetector::default().detect(location, reports, lookback_days, as_of)
}

/// Per-symptom report counts for each day of the window, oldest first
///
/// A symptom named twice in one report counts once.
fn daily_counts(
    reports: &[&SymptomReport],
    window_start: NaiveDate,
    days: usize,
) -> FxHashMap<String, Vec<u32>> {
    let mut counts: FxHashMap<String, Vec<u32>> = FxHashMap::default();
    for report in reports {
        let Ok(day) = usize::try_from((report.reported_on - window_start).num_days()) else {
            continue;
        };
        if day >= days {
            continue;
        }
        let symptoms = report
            .symptoms
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unique();
        for symptom in symptoms {
            counts.entry(symptom).or_insert_with(|| vec![0; days])[day] += 1;
        }
    }
    counts
}
