//! Algorithm implementations for epidemic forecasting and surveillance
//!
//! This module contains the computational core: parameter calibration and
//! SEIR simulation, cross-validation of the two against history, geographic
//! spread prediction, and statistical early warning on symptom reports.
//! Every entry point is a pure function of its arguments and the static
//! reference tables in [`crate::registry`].

pub mod forecasting;
pub mod spread;
pub mod surveillance;
pub mod validation;

// Re-export the primary entry points
pub use forecasting::{Calibrator, SeirEngine, calibrate, forecast_scenarios, simulate};
pub use spread::{SpreadPredictor, haversine_distance_km, predict_spread};
pub use surveillance::{AnomalyDetector, detect_anomalies};
pub use validation::{CrossValidator, cross_validate, cross_validate_all};
