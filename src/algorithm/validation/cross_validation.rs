//! K-fold cross-validation of calibration and simulation
//!
//! Records for a disease are shuffled with an explicit seed and split into k
//! contiguous folds. For each fold the calibrator is retrained on the other
//! k-1 folds and every held-out outbreak is simulated for its recorded
//! duration, seeded with 10% of its recorded cases. The simulated peak is
//! scored against the recorded case count.

use std::ops::Range;
use std::time::Instant;

use indicatif::{ParallelProgressIterator, ProgressIterator};
use itertools::Itertools;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;

use super::metrics::{evaluate, mean_metrics};
use crate::algorithm::forecasting::{Calibrator, SeirEngine};
use crate::config::ValidationConfig;
use crate::models::{
    CalibratedParameters, HistoricalOutbreakRecord, ModelQuality, ValidationFoldResult,
    ValidationOutcome, ValidationReport,
};
use crate::registry::{DiseaseRegistry, HealthcareQualityIndex, normalize_name};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};
use crate::utils::{log_clamp, log_operation_complete, log_operation_start};

/// Fewest folds that leave data on both sides of the split
pub const MIN_FOLDS: usize = 2;

/// Cross-validates the calibrator and SEIR engine against history
#[derive(Debug, Clone)]
pub struct CrossValidator<'a> {
    config: ValidationConfig,
    diseases: &'a DiseaseRegistry,
    healthcare: &'a HealthcareQualityIndex,
}

impl Default for CrossValidator<'static> {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl CrossValidator<'static> {
    /// Create a validator backed by the built-in reference tables
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self::with_registries(config, DiseaseRegistry::global(), HealthcareQualityIndex::global())
    }
}

impl<'a> CrossValidator<'a> {
    /// Create a validator backed by caller-supplied reference tables
    #[must_use]
    pub const fn with_registries(
        config: ValidationConfig,
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
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Cross-validate one disease
    ///
    /// Returns [`ValidationOutcome::InsufficientData`] when the disease has
    /// fewer records than folds.
    #[must_use]
    pub fn cross_validate(
        &self,
        disease: &str,
        records: &[HistoricalOutbreakRecord],
    ) -> ValidationOutcome {
        let folds = self.fold_count();
        let mut subset: Vec<&HistoricalOutbreakRecord> =
            records.iter().filter(|r| r.is_disease(disease)).collect();

        if subset.len() < folds {
            info!(
                "Cannot cross-validate {disease}: {} records found, {folds} required",
                subset.len()
            );
            return ValidationOutcome::InsufficientData {
                disease: disease.to_string(),
                data_points: subset.len(),
                required: folds,
            };
        }

        let start = Instant::now();
        log_operation_start("Cross-validating", disease);

        let mut rng = StdRng::seed_from_u64(self.config.random_seed);
        subset.shuffle(&mut rng);

        let ranges: Vec<(usize, Range<usize>)> =
            fold_ranges(subset.len(), folds).into_iter().enumerate().collect();

        let fold_results: Vec<ValidationFoldResult> = if self.config.use_parallel {
            ranges
                .into_par_iter()
                .map(|(fold, range)| self.evaluate_fold(disease, &subset, fold, range))
                .collect()
        } else {
            ranges
                .into_iter()
                .map(|(fold, range)| self.evaluate_fold(disease, &subset, fold, range))
                .collect()
        };

        let mean = mean_metrics(&fold_results.iter().map(|f| f.metrics).collect_vec());
        let quality = ModelQuality::from_mape(mean.mape);

        log_operation_complete("validated", disease, fold_results.len(), Some(start.elapsed()));
        info!(
            "{disease}: mean MAPE {:.2}%, R² {:.4} ({quality})",
            mean.mape, mean.r_squared
        );

        ValidationOutcome::Completed(ValidationReport {
            disease: disease.to_string(),
            folds,
            data_points: subset.len(),
            random_seed: self.config.random_seed,
            fold_results,
            mean_metrics: mean,
            quality,
        })
    }

    /// Cross-validate every disease present in the records
    ///
    /// Diseases are identified by normalized name and validated in parallel
    /// unless `use_parallel` is off; outcomes are sorted by disease name.
    #[must_use]
    pub fn cross_validate_all(&self, records: &[HistoricalOutbreakRecord]) -> Vec<ValidationOutcome> {
        let diseases = records
            .iter()
            .map(|r| normalize_name(&r.disease))
            .filter(|d| !d.is_empty())
            .sorted()
            .dedup()
            .collect_vec();

        let pb = create_main_progress_bar(diseases.len() as u64, Some("Cross-validating diseases"));
        let outcomes: Vec<ValidationOutcome> = if self.config.use_parallel {
            diseases
                .par_iter()
                .progress_with(pb.clone())
                .map(|disease| self.cross_validate(disease, records))
                .collect()
        } else {
            diseases
                .iter()
                .progress_with(pb.clone())
                .map(|disease| self.cross_validate(disease, records))
                .collect()
        };
        finish_progress_bar(&pb, Some("Cross-validation complete"));

        outcomes
    }

    fn fold_count(&self) -> usize {
        let folds = self.config.folds.max(MIN_FOLDS);
        if folds != self.config.folds {
            log_clamp("fold count", self.config.folds as f64, folds as f64);
        }
        folds
    }

    fn evaluate_fold(
        &self,
        disease: &str,
        shuffled: &[&HistoricalOutbreakRecord],
        fold: usize,
        held_out: Range<usize>,
    ) -> ValidationFoldResult {
        let training = shuffled[..held_out.start]
            .iter()
            .chain(&shuffled[held_out.end..])
            .copied()
            .collect_vec();
        let test = &shuffled[held_out];

        let calibrator = Calibrator::with_registries(
            self.config.calibration.clone(),
            self.diseases,
            self.healthcare,
        );
        let params = calibrator.estimate(disease, None, &training);
        let engine = SeirEngine::new(self.config.simulation.clone());

        let (predicted, actual): (Vec<f64>, Vec<f64>) = test
            .iter()
            .map(|record| {
                (
                    self.simulated_peak(&engine, &params, record),
                    record.case_count as f64,
                )
            })
            .unzip();

        let metrics = evaluate(&predicted, &actual);
        debug!(
            "{disease} fold {}: train={} test={} MAPE={:.2}%",
            fold + 1,
            training.len(),
            test.len(),
            metrics.mape
        );

        ValidationFoldResult {
            fold,
            training_size: training.len(),
            test_size: test.len(),
            metrics,
            predicted,
            actual,
        }
    }

    /// Peak infected when replaying a historical outbreak with calibrated rates
    fn simulated_peak(
        &self,
        engine: &SeirEngine,
        params: &CalibratedParameters,
        record: &HistoricalOutbreakRecord,
    ) -> f64 {
        let cases = record.case_count as f64;
        let population = (cases * self.config.population_multiplier).max(1.0);
        let initial_infected = cases * self.config.initial_infected_fraction;
        let seir = params.to_seir_parameters(population, initial_infected, 0.0, 0.0);
        let horizon = i32::try_from(record.duration_days).unwrap_or(i32::MAX);

        engine.simulate(&seir, horizon).peak_infected
    }
}

/// Cross-validate one disease with `k` folds and otherwise default settings
#[must_use]
pub fn cross_validate(
    disease: &str,
    k: usize,
    records: &[HistoricalOutbreakRecord],
) -> ValidationOutcome {
    CrossValidator::new(ValidationConfig::builder().folds(k).build()).cross_validate(disease, records)
}

/// Cross-validate every disease in the records with `k` folds
#[must_use]
pub fn cross_validate_all(records: &[HistoricalOutbreakRecord], k: usize) -> Vec<ValidationOutcome> {
    CrossValidator::new(ValidationConfig::builder().folds(k).build()).cross_validate_all(records)
}

/// Contiguous fold boundaries; the first `n % k` folds hold one extra record
fn fold_ranges(n: usize, k: usize) -> Vec<Range<usize>> {
    let base = n / k;
    let extra = n % k;
    let mut start = 0;
    (0..k)
        .map(|i| {
            let size = base + usize::from(i < extra);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}
