//! Async entry points for the forecasting engine
//!
//! The numeric operations are CPU bound, so each call runs on a blocking
//! worker thread under a caller-supplied deadline. When the deadline expires
//! the caller gets [`ForecastError::Timeout`]; the worker finishes in the
//! background and its result is dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use itertools::Itertools;

use crate::algorithm::{AnomalyDetector, CrossValidator, SeirEngine, SpreadPredictor};
use crate::config::{SimulationConfig, SpreadConfig, SurveillanceConfig, ValidationConfig};
use crate::error::{ForecastError, Result};
use crate::models::{
    AnomalyReport, ForecastResult, GeoBounds, HistoricalOutbreakRecord, OutbreakLocation,
    SEIRParameters, SpreadPrediction, SymptomReport, ValidationOutcome,
};

/// Run a blocking closure on the tokio blocking pool with a deadline
pub async fn run_with_timeout<T, F>(operation: &str, timeout: Duration, work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let handle = tokio::task::spawn_blocking(work);
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(join_error)) => {
            log::error!("{operation} worker failed: {join_error}");
            Err(ForecastError::TaskFailed(format!("{operation}: {join_error}")))
        }
        Err(_) => {
            log::warn!("{operation} timed out after {timeout:?}");
            Err(ForecastError::Timeout {
                operation: operation.to_string(),
                timeout,
            })
        }
    }
}

/// Run an SEIR simulation with a deadline
pub async fn simulate_async(
    params: SEIRParameters,
    horizon_days: i32,
    config: SimulationConfig,
    timeout: Duration,
) -> Result<ForecastResult> {
    run_with_timeout("SEIR simulation", timeout, move || {
        SeirEngine::new(config).simulate(&params, horizon_days)
    })
    .await
}

/// Cross-validate one disease with a deadline
pub async fn cross_validate_async(
    disease: String,
    records: Arc<[HistoricalOutbreakRecord]>,
    config: ValidationConfig,
    timeout: Duration,
) -> Result<ValidationOutcome> {
    let operation = format!("Cross-validation of {disease}");
    run_with_timeout(&operation, timeout, move || {
        CrossValidator::new(config).cross_validate(&disease, &records)
    })
    .await
}

/// Cross-validate several diseases concurrently
///
/// At most one validation per CPU runs at a time, each under its own
/// deadline. Outcomes are sorted by disease name; the first failure is
/// returned as the error.
pub async fn cross_validate_many_async(
    diseases: Vec<String>,
    records: Arc<[HistoricalOutbreakRecord]>,
    config: ValidationConfig,
    timeout: Duration,
) -> Result<Vec<ValidationOutcome>> {
    let concurrency = num_cpus::get().max(1);
    log::info!(
        "Cross-validating {} diseases with up to {concurrency} concurrent workers",
        diseases.len()
    );

    let results = stream::iter(diseases)
        .map(|disease| {
            let records = Arc::clone(&records);
            let config = config.clone();
            async move { cross_validate_async(disease, records, config, timeout).await }
        })
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await;

    let outcomes = results.into_iter().collect::<Result<Vec<_>>>()?;
    Ok(outcomes
        .into_iter()
        .sorted_by(|a, b| a.disease().cmp(b.disease()))
        .collect())
}

/// Predict geographic spread with a deadline
pub async fn predict_spread_async(
    outbreaks: Vec<OutbreakLocation>,
    bounds: GeoBounds,
    config: SpreadConfig,
    timeout: Duration,
) -> Result<SpreadPrediction> {
    run_with_timeout("Spread prediction", timeout, move || {
        SpreadPredictor::new(config).predict(&outbreaks, &bounds)
    })
    .await
}

/// Detect symptom anomalies with a deadline
pub async fn detect_anomalies_async(
    location: String,
    reports: Vec<SymptomReport>,
    lookback_days: u32,
    as_of: NaiveDate,
    config: SurveillanceConfig,
    timeout: Duration,
) -> Result<AnomalyReport> {
    run_with_timeout("Anomaly detection", timeout, move || {
        AnomalyDetector::new(config).detect(&location, &reports, lookback_days, as_of)
    })
    .await
}
