//! Parameter calibration and compartmental simulation
//!
//! The calibrator turns historical outbreak records into SEIR rates; the
//! engine integrates those rates forward in time. Scenario forecasts run the
//! engine several times with perturbed transmission.

pub mod calibration;
pub mod scenarios;
pub mod seir;

pub use calibration::{Calibrator, calibrate};
pub use scenarios::forecast_scenarios;
pub use seir::{SeirEngine, simulate};
