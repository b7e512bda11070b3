//! Regression accuracy metrics
//!
//! All functions compare `predicted[i]` with `actual[i]` and return 0 for
//! empty or mismatched inputs. Denominators are checked before dividing.

use crate::models::ValidationMetrics;

/// Root-mean-square error
#[must_use]
pub fn rmse(predicted: &[f64], actual: &[f64]) -> f64 {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return 0.0;
    }

    let mse = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a).powi(2))
        .sum::<f64>()
        / predicted.len() as f64;

    mse.sqrt()
}

/// Mean absolute error
#[must_use]
pub fn mae(predicted: &[f64], actual: &[f64]) -> f64 {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return 0.0;
    }

    predicted.iter().zip(actual).map(|(p, a)| (p - a).abs()).sum::<f64>() / predicted.len() as f64
}

/// Mean absolute percentage error, in percent
///
/// Pairs whose actual value is zero have no defined percentage error and are
/// left out; if every actual value is zero the result is 0.
#[must_use]
pub fn mape(predicted: &[f64], actual: &[f64]) -> f64 {
    if predicted.len() != actual.len() {
        return 0.0;
    }

    let (sum, count) = predicted
        .iter()
        .zip(actual)
        .filter(|(_, a)| **a != 0.0)
        .fold((0.0, 0_usize), |(sum, count), (p, a)| {
            (sum + ((a - p) / a).abs(), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        100.0 * sum / count as f64
    }
}

/// Coefficient of determination 1 - SS_res / SS_tot
///
/// When the actual values have no variance, R² is 1 for a perfect prediction
/// and 0 otherwise.
#[must_use]
pub fn r_squared(predicted: &[f64], actual: &[f64]) -> f64 {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return 0.0;
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = predicted.iter().zip(actual).map(|(p, a)| (a - p).powi(2)).sum();

    if ss_tot == 0.0 {
        if ss_res == 0.0 { 1.0 } else { 0.0 }
    } else {
        1.0 - ss_res / ss_tot
    }
}

/// All four metrics at once
#[must_use]
pub fn evaluate(predicted: &[f64], actual: &[f64]) -> ValidationMetrics {
    ValidationMetrics {
        rmse: rmse(predicted, actual),
        mae: mae(predicted, actual),
        mape: mape(predicted, actual),
        r_squared: r_squared(predicted, actual),
    }
}

/// Field-wise mean of several metric sets
#[must_use]
pub fn mean_metrics(metrics: &[ValidationMetrics]) -> ValidationMetrics {
    if metrics.is_empty() {
        return ValidationMetrics::default();
    }

    let n = metrics.len() as f64;
    ValidationMetrics {
        rmse: metrics.iter().map(|m| m.rmse).sum::<f64>() / n,
        mae: metrics.iter().map(|m| m.mae).sum::<f64>() / n,
        mape: metrics.iter().map(|m| m.mape).sum::<f64>() / n,
        r_squared: metrics.iter().map(|m| m.r_squared).sum::<f64>() / n,
    }
}
