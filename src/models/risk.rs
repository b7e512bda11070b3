//! Geographic risk outputs

use serde::{Deserialize, Serialize};

/// A latitude/longitude rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    /// Create bounds, swapping corners given in the wrong order
    #[must_use]
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat: min_lat.min(max_lat),
            max_lat: min_lat.max(max_lat),
            min_lng: min_lng.min(max_lng),
            max_lng: min_lng.max(max_lng),
        }
    }

    /// Latitude span in degrees
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude span in degrees
    #[must_use]
    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Centre of the rectangle
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Whether a point lies inside (inclusive)
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lng..=self.max_lng).contains(&longitude)
    }
}

/// Risk bucket of a ranked area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Risk of at least 7
    High,
    /// Risk in [5, 7)
    Medium,
    /// Risk in [4, 5)
    Low,
    /// Risk below 4; never ranked
    Minimal,
}

/// A location at risk of onward spread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskArea {
    pub latitude: f64,
    pub longitude: f64,
    /// Combined risk from all outbreaks, 0-10
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    /// Risk expressed as a probability, 0-1
    pub spread_probability: f64,
    /// Cases expected here if spread occurs
    pub estimated_cases: u64,
    /// Days until cases are expected to appear
    pub estimated_days_to_onset: f64,
    /// Disease of the outbreak contributing most risk
    pub source_disease: String,
    /// Distance to the outbreak contributing most risk
    pub distance_to_source_km: f64,
}

/// One heatmap cell with non-negligible risk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub latitude: f64,
    pub longitude: f64,
    pub risk: f64,
}

/// Result of one spread prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpreadPrediction {
    /// Areas with risk of at least 7, highest first
    pub high_risk: Vec<RiskArea>,
    /// Areas with risk in [5, 7), highest first
    pub medium_risk: Vec<RiskArea>,
    /// Areas with risk in [4, 5), highest first
    pub low_risk: Vec<RiskArea>,
    /// Fine-grained grid for heatmap rendering
    pub heatmap: Vec<HeatmapCell>,
    /// Number of outbreaks that contributed to the prediction
    pub outbreaks_considered: usize,
}

impl SpreadPrediction {
    /// Total number of ranked areas across all buckets
    #[must_use]
    pub fn ranked_area_count(&self) -> usize {
        self.high_risk.len() + self.medium_risk.len() + self.low_risk.len()
    }
}
