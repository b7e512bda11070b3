//! Epidemic forecasting and geographic risk engine
//!
//! Calibrates SEIR transmission parameters from historical outbreaks, runs
//! compartmental forecasts, cross-validates the calibration, projects
//! geographic spread risk around active outbreaks and flags unusual symptom
//! clusters in surveillance reports.

pub mod algorithm;
pub mod async_io;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod registry;
pub mod utils;

// Core operations
pub use algorithm::{
    AnomalyDetector, Calibrator, CrossValidator, SeirEngine, SpreadPredictor, calibrate,
    cross_validate, cross_validate_all, detect_anomalies, forecast_scenarios,
    haversine_distance_km, predict_spread, simulate,
};

// Configuration and errors
pub use config::{
    CalibrationConfig, EngineConfig, SimulationConfig, SpreadConfig, SurveillanceConfig,
    ValidationConfig,
};
pub use error::{ForecastError, Result};

// Domain types
pub use models::{
    AnomalyReport, CalibratedParameters, ForecastResult, GeoBounds, HistoricalOutbreakRecord,
    OutbreakLocation, RiskArea, RiskLevel, SEIRParameters, SpreadPrediction, SymptomReport,
    ValidationOutcome, ValidationReport,
};
pub use registry::{DiseaseRegistry, HealthcareQualityIndex};

// Dataset loading
pub use dataset::{load_historical_records, load_historical_records_dir, load_symptom_reports};
