//! Value objects exchanged with the forecasting core
//!
//! Nothing in here owns anything else. Inputs (historical records, outbreak
//! locations, symptom reports) are read-only; outputs (forecasts, risk areas,
//! validation and surveillance reports) are produced fresh per call and handed
//! to the caller, who decides whether to store or serve them.

pub mod forecast;
pub mod outbreak;
pub mod risk;
pub mod surveillance;
pub mod validation;

pub use forecast::{
    CalibratedParameters, ConfidenceBand, ForecastResult, ScenarioForecast, ScenarioKind,
    SEIRParameters, SimulationPoint,
};
pub use outbreak::{HistoricalOutbreakRecord, OutbreakLocation, SymptomReport};
pub use risk::{GeoBounds, HeatmapCell, RiskArea, RiskLevel, SpreadPrediction};
pub use surveillance::{AnomalyReport, AnomalyStatus, Significance, SymptomClusterStat};
pub use validation::{
    ModelQuality, ValidationFoldResult, ValidationMetrics, ValidationOutcome, ValidationReport,
};
