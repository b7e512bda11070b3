//! Distance-decay risk prediction around active outbreaks
//!
//! An outbreak with `c` cases and severity `s` has a base risk of
//! `min(10, c/10 × s/2.5)`. At distance `d` it contributes
//! `base × exp(-d / (range/3)) × R0/2`, and nothing at or beyond the
//! disease's maximum range. Contributions add up to at most 10.

use std::time::Instant;

use log::debug;
use rayon::prelude::*;
use smallvec::SmallVec;

use super::geo::{KM_PER_DEGREE_LAT, axis_samples, haversine_distance_km, km_per_degree_lng, samples_for_span};
use crate::config::SpreadConfig;
use crate::models::{GeoBounds, HeatmapCell, OutbreakLocation, RiskArea, RiskLevel, SpreadPrediction};
use crate::registry::{DiseaseProfile, DiseaseRegistry};
use crate::utils::{log_clamp, log_operation_complete, log_operation_start};

/// Upper bound of every risk score
pub const MAX_RISK: f64 = 10.0;

/// Distances this close to the range edge count as at the edge
const RANGE_TOLERANCE_KM: f64 = 1e-6;

/// Slowest spread speed used for arrival estimates
const MIN_SPREAD_SPEED_KM_PER_DAY: f64 = 0.1;

/// Risk from one outbreak at one location
#[derive(Debug, Clone, Copy)]
struct Contribution {
    risk: f64,
    distance_km: f64,
    outbreak: usize,
}

/// Intrinsic risk of an outbreak before distance decay
#[must_use]
pub fn base_risk(outbreak: &OutbreakLocation) -> f64 {
    let severity = if outbreak.severity >= 0.0 {
        outbreak.severity
    } else {
        log_clamp("severity", outbreak.severity, 0.0);
        0.0
    };
    ((outbreak.case_count as f64 / 10.0) * (severity / 2.5)).min(MAX_RISK)
}

/// Risk contributed by an outbreak at a given distance
fn decayed_risk(base: f64, profile: &DiseaseProfile, distance_km: f64) -> f64 {
    if distance_km >= profile.max_range_km - RANGE_TOLERANCE_KM {
        return 0.0;
    }
    base * (-distance_km / (profile.max_range_km / 3.0)).exp() * (profile.r0 / 2.0)
}

/// Ranks locations by spread risk and renders heatmaps
#[derive(Debug, Clone)]
pub struct SpreadPredictor<'a> {
    config: SpreadConfig,
    diseases: &'a DiseaseRegistry,
}

impl Default for SpreadPredictor<'static> {
    fn default() -> Self {
        Self::new(SpreadConfig::default())
    }
}

impl SpreadPredictor<'static> {
    /// Create a predictor backed by the built-in disease registry
    #[must_use]
    pub fn new(config: SpreadConfig) -> Self {
        Self::with_registry(config, DiseaseRegistry::global())
    }
}

impl<'a> SpreadPredictor<'a> {
    /// Create a predictor backed by a caller-supplied disease registry
    #[must_use]
    pub const fn with_registry(config: SpreadConfig, diseases: &'a DiseaseRegistry) -> Self {
        Self { config, diseases }
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &SpreadConfig {
        &self.config
    }

    /// Risk a single outbreak contributes at a location
    #[must_use]
    pub fn contribution(&self, outbreak: &OutbreakLocation, latitude: f64, longitude: f64) -> f64 {
        let profile = self.diseases.profile(&outbreak.disease);
        let distance = haversine_distance_km(outbreak.latitude, outbreak.longitude, latitude, longitude);
        decayed_risk(base_risk(outbreak), profile, distance)
    }

    /// Combined risk of all outbreaks at a location, capped at 10
    #[must_use]
    pub fn risk_at(&self, outbreaks: &[OutbreakLocation], latitude: f64, longitude: f64) -> f64 {
        self.contributions(outbreaks, latitude, longitude)
            .iter()
            .map(|c| c.risk)
            .sum::<f64>()
            .min(MAX_RISK)
    }

    /// Full risk assessment of a location, or `None` if no outbreak reaches it
    #[must_use]
    pub fn assess_location(
        &self,
        outbreaks: &[OutbreakLocation],
        latitude: f64,
        longitude: f64,
    ) -> Option<RiskArea> {
        let contributions = self.contributions(outbreaks, latitude, longitude);
        let risk = contributions.iter().map(|c| c.risk).sum::<f64>().min(MAX_RISK);
        let dominant = contributions
            .iter()
            .max_by(|a, b| a.risk.total_cmp(&b.risk))?;

        let source = &outbreaks[dominant.outbreak];
        let profile = self.diseases.profile(&source.disease);
        let speed = profile.spread_speed_km_per_day.max(MIN_SPREAD_SPEED_KM_PER_DAY);
        let estimated_cases =
            (source.case_count as f64 * (risk / MAX_RISK) * self.config.onward_transmission_fraction).round();

        Some(RiskArea {
            latitude,
            longitude,
            risk_score: risk,
            risk_level: self.risk_level(risk),
            spread_probability: (risk / MAX_RISK).min(1.0),
            estimated_cases: estimated_cases as u64,
            estimated_days_to_onset: dominant.distance_km / speed + self.config.onset_offset_days,
            source_disease: profile.name.clone(),
            distance_to_source_km: dominant.distance_km,
        })
    }

    /// Rank sampled locations and render the heatmap for the bounds
    #[must_use]
    pub fn predict(&self, outbreaks: &[OutbreakLocation], bounds: &GeoBounds) -> SpreadPrediction {
        let start = Instant::now();
        log_operation_start(
            "Predicting spread for",
            &format!("{} outbreaks", outbreaks.len()),
        );

        let (mut high_risk, mut medium_risk, mut low_risk) = (Vec::new(), Vec::new(), Vec::new());
        for area in self.ranking_samples(outbreaks, bounds) {
            match area.risk_level {
                RiskLevel::High => high_risk.push(area),
                RiskLevel::Medium => medium_risk.push(area),
                RiskLevel::Low => low_risk.push(area),
                RiskLevel::Minimal => {}
            }
        }
        rank(&mut high_risk, self.config.high_risk_limit);
        rank(&mut medium_risk, self.config.medium_risk_limit);
        rank(&mut low_risk, self.config.low_risk_limit);

        let heatmap = self.heatmap(outbreaks, bounds);

        let prediction = SpreadPrediction {
            high_risk,
            medium_risk,
            low_risk,
            heatmap,
            outbreaks_considered: outbreaks.len(),
        };
        log_operation_complete(
            "ranked",
            "spread prediction",
            prediction.ranked_area_count(),
            Some(start.elapsed()),
        );
        prediction
    }

    /// Heatmap cells at roughly the configured resolution with risk above the floor
    #[must_use]
    pub fn heatmap(&self, outbreaks: &[OutbreakLocation], bounds: &GeoBounds) -> Vec<HeatmapCell> {
        let (center_lat, _) = bounds.center();
        let cap = self.config.max_heatmap_cells_per_axis;
        let rows = samples_for_span(
            bounds.lat_span() * KM_PER_DEGREE_LAT,
            self.config.heatmap_resolution_km,
            cap,
        );
        let cols = samples_for_span(
            bounds.lng_span() * km_per_degree_lng(center_lat),
            self.config.heatmap_resolution_km,
            cap,
        );
        debug!("Heatmap grid: {rows} x {cols} cells");

        let lats = axis_samples(bounds.min_lat, bounds.max_lat, rows);
        let lngs = axis_samples(bounds.min_lng, bounds.max_lng, cols);

        lats.par_iter()
            .flat_map_iter(|&latitude| {
                lngs.iter().filter_map(move |&longitude| {
                    let risk = self.risk_at(outbreaks, latitude, longitude);
                    (risk > self.config.heatmap_min_risk).then_some(HeatmapCell {
                        latitude,
                        longitude,
                        risk,
                    })
                })
            })
            .collect()
    }

    fn ranking_samples(&self, outbreaks: &[OutbreakLocation], bounds: &GeoBounds) -> Vec<RiskArea> {
        let n = self.config.grid_points_per_axis;
        let lats = axis_samples(bounds.min_lat, bounds.max_lat, n);
        let lngs = axis_samples(bounds.min_lng, bounds.max_lng, n);

        lats.iter()
            .flat_map(|&latitude| lngs.iter().map(move |&longitude| (latitude, longitude)))
            .filter(|&(latitude, longitude)| !self.near_outbreak(outbreaks, latitude, longitude))
            .filter_map(|(latitude, longitude)| self.assess_location(outbreaks, latitude, longitude))
            .collect()
    }

    /// Samples this close to a centre describe the outbreak itself, not its spread
    fn near_outbreak(&self, outbreaks: &[OutbreakLocation], latitude: f64, longitude: f64) -> bool {
        outbreaks.iter().any(|o| {
            haversine_distance_km(o.latitude, o.longitude, latitude, longitude)
                < self.config.exclusion_radius_km
        })
    }

    fn contributions(
        &self,
        outbreaks: &[OutbreakLocation],
        latitude: f64,
        longitude: f64,
    ) -> SmallVec<[Contribution; 8]> {
        outbreaks
            .iter()
            .enumerate()
            .filter_map(|(index, outbreak)| {
                let profile = self.diseases.profile(&outbreak.disease);
                let distance_km =
                    haversine_distance_km(outbreak.latitude, outbreak.longitude, latitude, longitude);
                let risk = decayed_risk(base_risk(outbreak), profile, distance_km);
                (risk > 0.0).then_some(Contribution {
                    risk,
                    distance_km,
                    outbreak: index,
                })
            })
            .collect()
    }

    /// Bucket a risk score by the configured thresholds
    #[must_use]
    pub fn risk_level(&self, risk: f64) -> RiskLevel {
        if risk >= self.config.high_risk_threshold {
            RiskLevel::High
        } else if risk >= self.config.medium_risk_threshold {
            RiskLevel::Medium
        } else if risk >= self.config.low_risk_threshold {
            RiskLevel::Low
        } else {
            RiskLevel::Minimal
        }
    }
}

/// Predict spread with the default configuration and built-in registry
#[must_use]
pub fn predict_spread(outbreaks: &[OutbreakLocation], bounds: &GeoBounds) -> SpreadPrediction {
    SpreadPredictor::default().predict(outbreaks, bounds)
}

fn rank(areas: &mut Vec<RiskArea>, limit: usize) {
    areas.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    areas.truncate(limit);
}
