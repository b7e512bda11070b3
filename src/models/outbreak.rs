//! Input records: historical outbreaks, active outbreak sites and symptom reports

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::registry::normalize_name;

/// One historical outbreak, as reported by a surveillance authority
///
/// Reference data: records are only ever read for calibration and validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalOutbreakRecord {
    /// Disease name as reported
    pub disease: String,
    /// Region the outbreak was reported in
    pub region: String,
    /// Year the outbreak started
    pub year: i32,
    /// Month the outbreak started (1-12)
    pub month: u32,
    /// Total reported cases
    pub case_count: u64,
    /// Total reported deaths
    pub death_count: u64,
    /// Length of the outbreak in days
    pub duration_days: u32,
}

impl HistoricalOutbreakRecord {
    /// Create a record for a disease and region
    #[must_use]
    pub fn new(
        disease: impl Into<String>,
        region: impl Into<String>,
        year: i32,
        month: u32,
        case_count: u64,
        death_count: u64,
        duration_days: u32,
    ) -> Self {
        Self {
            disease: disease.into(),
            region: region.into(),
            year,
            month,
            case_count,
            death_count,
            duration_days,
        }
    }

    /// Whether this record describes the given disease (ignoring case and separators)
    #[must_use]
    pub fn is_disease(&self, disease: &str) -> bool {
        normalize_name(&self.disease) == normalize_name(disease)
    }

    /// Whether this record was reported in the given region (ignoring case and separators)
    #[must_use]
    pub fn is_region(&self, region: &str) -> bool {
        normalize_name(&self.region) == normalize_name(region)
    }
}

/// An active outbreak site used as a source of geographic risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutbreakLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Current number of cases at the site
    pub case_count: u64,
    /// Disease name, resolved against the disease registry
    pub disease: String,
    /// Severity scalar; 2.5 is a typical outbreak
    pub severity: f64,
}

impl OutbreakLocation {
    /// Create an outbreak site
    #[must_use]
    pub fn new(
        latitude: f64,
        longitude: f64,
        case_count: u64,
        disease: impl Into<String>,
        severity: f64,
    ) -> Self {
        Self {
            latitude,
            longitude,
            case_count,
            disease: disease.into(),
            severity,
        }
    }
}

/// A single symptom report filed for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomReport {
    /// Location identifier the report belongs to
    pub location: String,
    /// Day the report was filed
    pub reported_on: NaiveDate,
    /// Symptoms named in the report
    pub symptoms: Vec<String>,
}

impl SymptomReport {
    /// Create a symptom report
    #[must_use]
    pub fn new<S: Into<String>>(
        location: impl Into<String>,
        reported_on: NaiveDate,
        symptoms: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            location: location.into(),
            reported_on,
            symptoms: symptoms.into_iter().map(Into::into).collect(),
        }
    }
}
