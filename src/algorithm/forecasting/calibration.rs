//! Historical-data parameter calibration
//!
//! Estimates transmission and recovery rates for a disease from the mean
//! size, lethality and length of its past outbreaks. The incubation rate
//! comes from the disease registry rather than from the data.

use log::{debug, info};

use crate::config::CalibrationConfig;
use crate::models::{CalibratedParameters, HistoricalOutbreakRecord};
use crate::registry::{DiseaseRegistry, HealthcareQualityIndex};
use crate::utils::log_clamp;

/// Outbreak duration divided by this gives the mean infectious period
const DURATION_TO_INFECTIOUS_PERIOD: f64 = 3.0;

/// Case count at which the empirical growth rate is neutral
const GROWTH_REFERENCE_CASES: f64 = 100.0;

/// Derives SEIR rates from historical outbreak records
#[derive(Debug, Clone)]
pub struct Calibrator<'a> {
    config: CalibrationConfig,
    diseases: &'a DiseaseRegistry,
    healthcare: &'a HealthcareQualityIndex,
}

impl Default for Calibrator<'static> {
    fn default() -> Self {
        Self::new(CalibrationConfig::default())
    }
}

impl Calibrator<'static> {
    /// Create a calibrator backed by the built-in reference tables
    #[must_use]
    pub fn new(config: CalibrationConfig) -> Self {
        Self::with_registries(config, DiseaseRegistry::global(), HealthcareQualityIndex::global())
    }
}

impl<'a> Calibrator<'a> {
    /// Create a calibrator backed by caller-supplied reference tables
    #[must_use]
    pub const fn with_registries(
        config: CalibrationConfig,
        diseases: &'a DiseaseRegistry,
        healthcare: &'a HealthcareQualityIndex,
    ) -> Self {
        Self {
            config,
            diseases,
            healthcare,
        }
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Estimate parameters for a disease, optionally restricted to a region
    ///
    /// Records are filtered by disease and region; when no record matches the
    /// region the region filter is dropped, and when the disease has no records
    /// at all the configured defaults are returned with `trained = false`.
    #[must_use]
    pub fn calibrate(
        &self,
        disease: &str,
        region: Option<&str>,
        records: &[HistoricalOutbreakRecord],
    ) -> CalibratedParameters {
        let selected = select_records(records, disease, region);
        self.estimate(disease, region, &selected)
    }

    /// Estimate parameters from records that were already selected
    pub(crate) fn estimate(
        &self,
        disease: &str,
        region: Option<&str>,
        selected: &[&HistoricalOutbreakRecord],
    ) -> CalibratedParameters {
        if selected.is_empty() {
            info!("No historical records for {disease}; using default parameters");
            return self.defaults(disease, region);
        }

        let count = selected.len() as f64;
        let mean_cases = selected.iter().map(|r| r.case_count as f64).sum::<f64>() / count;
        let mean_deaths = selected.iter().map(|r| r.death_count as f64).sum::<f64>() / count;
        let mean_duration =
            (selected.iter().map(|r| f64::from(r.duration_days)).sum::<f64>() / count).max(1.0);

        let base_gamma = 1.0 / (mean_duration / DURATION_TO_INFECTIOUS_PERIOD);

        // Fatal cases leave the infectious pool without recovering
        let case_fatality_rate = if mean_cases > 0.0 {
            (mean_deaths / mean_cases).min(1.0)
        } else {
            0.0
        };
        let adjusted_gamma = base_gamma * (1.0 - case_fatality_rate);

        let growth_rate = (mean_cases / GROWTH_REFERENCE_CASES).powf(1.0 / mean_duration);
        let raw_beta = growth_rate * adjusted_gamma * self.config.r0_heuristic;

        let sigma = self.diseases.profile(disease).incubation_rate();

        let raw_gamma = match region.and_then(|r| self.healthcare_quality(r)) {
            Some(quality) => adjusted_gamma * quality,
            None => adjusted_gamma,
        };

        let beta = clamp_rate("beta", raw_beta, self.config.beta_range);
        let gamma = clamp_rate("gamma", raw_gamma, self.config.gamma_range);

        debug!(
            "Calibrated {disease} from {} records: beta={beta:.4} sigma={sigma:.4} gamma={gamma:.4} cfr={case_fatality_rate:.4}",
            selected.len()
        );

        CalibratedParameters {
            disease: disease.to_string(),
            region: region.map(str::to_string),
            beta,
            sigma,
            gamma,
            case_fatality_rate,
            data_points: selected.len(),
            trained: true,
        }
    }

    /// The documented default parameter set
    #[must_use]
    pub fn defaults(&self, disease: &str, region: Option<&str>) -> CalibratedParameters {
        CalibratedParameters {
            disease: disease.to_string(),
            region: region.map(str::to_string),
            beta: self.config.default_beta,
            sigma: self.config.default_sigma,
            gamma: self.config.default_gamma,
            case_fatality_rate: 0.0,
            data_points: 0,
            trained: false,
        }
    }

    fn healthcare_quality(&self, region: &str) -> Option<f64> {
        if self.config.apply_healthcare_quality {
            self.healthcare.quality(region)
        } else {
            None
        }
    }
}

/// Estimate parameters with the default configuration and built-in tables
#[must_use]
pub fn calibrate(
    disease: &str,
    region: Option<&str>,
    records: &[HistoricalOutbreakRecord],
) -> CalibratedParameters {
    Calibrator::default().calibrate(disease, region, records)
}

/// Records for the disease and region, falling back to the disease alone
fn select_records<'r>(
    records: &'r [HistoricalOutbreakRecord],
    disease: &str,
    region: Option<&str>,
) -> Vec<&'r HistoricalOutbreakRecord> {
    let for_disease: Vec<&HistoricalOutbreakRecord> =
        records.iter().filter(|r| r.is_disease(disease)).collect();

    if let Some(region) = region {
        let for_region: Vec<&HistoricalOutbreakRecord> = for_disease
            .iter()
            .copied()
            .filter(|r| r.is_region(region))
            .collect();
        if !for_region.is_empty() {
            return for_region;
        }
        debug!("No {disease} records for region {region}; using all regions");
    }

    for_disease
}

fn clamp_rate(name: &str, value: f64, (low, high): (f64, f64)) -> f64 {
    let clamped = if value.is_nan() { low } else { value.clamp(low, high) };
    if clamped != value {
        log_clamp(name, value, clamped);
    }
    clamped
}
