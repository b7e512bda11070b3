//! Cross-validation outputs

use serde::{Deserialize, Serialize};

/// Regression accuracy of predicted against observed values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationMetrics {
    /// Root-mean-square error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Mean absolute percentage error, in percent
    pub mape: f64,
    /// Coefficient of determination
    pub r_squared: f64,
}

/// Scores of one held-out fold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFoldResult {
    /// Zero-based fold index
    pub fold: usize,
    /// Records the calibrator was trained on
    pub training_size: usize,
    /// Records that were simulated and scored
    pub test_size: usize,
    pub metrics: ValidationMetrics,
    /// Simulated peak infected for each held-out record
    pub predicted: Vec<f64>,
    /// Recorded case count for each held-out record
    pub actual: Vec<f64>,
}

/// Qualitative rating derived from the mean MAPE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelQuality {
    Good,
    Fair,
    NeedsImprovement,
}

impl ModelQuality {
    /// Classify a mean absolute percentage error
    #[must_use]
    pub fn from_mape(mape: f64) -> Self {
        if mape < 30.0 {
            Self::Good
        } else if mape < 50.0 {
            Self::Fair
        } else {
            Self::NeedsImprovement
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for ModelQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregated result of a k-fold cross-validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub disease: String,
    /// Number of folds used
    pub folds: usize,
    /// Records available for the disease
    pub data_points: usize,
    /// Seed of the shuffle preceding fold assignment
    pub random_seed: u64,
    pub fold_results: Vec<ValidationFoldResult>,
    /// Metrics averaged across folds
    pub mean_metrics: ValidationMetrics,
    pub quality: ModelQuality,
}

impl ValidationReport {
    /// Render the report as a fixed-width text table
    #[must_use]
    pub fn summary(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Cross-validation for {} ({} folds, {} records, seed {}):\n\
             - Mean RMSE: {:.4}\n\
             - Mean MAE:  {:.4}\n\
             - Mean MAPE: {:.2}%\n\
             - Mean R²:   {:.4}\n\
             - Model quality: {}\n\n",
            self.disease,
            self.folds,
            self.data_points,
            self.random_seed,
            self.mean_metrics.rmse,
            self.mean_metrics.mae,
            self.mean_metrics.mape,
            self.mean_metrics.r_squared,
            self.quality
        ));

        output.push_str(
            "Fold | Train | Test |       RMSE |        MAE |    MAPE |       R²\n\
             -----|-------|------|------------|------------|---------|---------\n",
        );
        for fold in &self.fold_results {
            output.push_str(&format!(
                "{:>4} | {:>5} | {:>4} | {:>10.4} | {:>10.4} | {:>7.2} | {:>8.4}\n",
                fold.fold + 1,
                fold.training_size,
                fold.test_size,
                fold.metrics.rmse,
                fold.metrics.mae,
                fold.metrics.mape,
                fold.metrics.r_squared
            ));
        }

        output
    }
}

/// Result of a cross-validation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Validation ran on every fold
    Completed(ValidationReport),
    /// Fewer records than folds were available
    InsufficientData {
        disease: String,
        /// Records found for the disease
        data_points: usize,
        /// Records needed to run
        required: usize,
    },
}

impl ValidationOutcome {
    /// The report, if validation ran
    #[must_use]
    pub const fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::InsufficientData { .. } => None,
        }
    }

    /// Disease the outcome refers to
    #[must_use]
    pub fn disease(&self) -> &str {
        match self {
            Self::Completed(report) => &report.disease,
            Self::InsufficientData { disease, .. } => disease,
        }
    }

    /// Records found for the disease
    #[must_use]
    pub const fn data_points(&self) -> usize {
        match self {
            Self::Completed(report) => report.data_points,
            Self::InsufficientData { data_points, .. } => *data_points,
        }
    }
}
