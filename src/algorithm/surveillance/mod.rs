//! Early-warning surveillance over symptom reports
//!
//! Flags symptoms whose recent daily frequency at a location is unusually
//! high compared with the lookback window, before any outbreak is reported.

pub mod anomaly;
pub mod stats;

pub use anomaly::{AnomalyDetector, detect_anomalies};
pub use stats::{mean, normal_cdf, normal_survival, population_std_dev};
