//! Model validation against historical outbreaks
//!
//! This module implements k-fold cross-validation of the calibrator and SEIR
//! engine, and the regression metrics the folds are scored with.

pub mod cross_validation;
pub mod metrics;

pub use cross_validation::{CrossValidator, cross_validate, cross_validate_all};
pub use metrics::{evaluate, mae, mape, mean_metrics, r_squared, rmse};
