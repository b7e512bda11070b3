//! Geographic spread prediction
//!
//! Active outbreaks radiate risk that decays exponentially with great-circle
//! distance. The predictor ranks sampled locations by combined risk and
//! renders a finer heatmap grid over the requested bounds.

pub mod geo;
pub mod predictor;

pub use geo::{EARTH_RADIUS_KM, axis_samples, haversine_distance_km};
pub use predictor::{SpreadPredictor, base_risk, predict_spread};
