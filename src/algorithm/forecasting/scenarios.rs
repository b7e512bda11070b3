//! Best / likely / worst case forecasts

use rayon::prelude::*;

use super::seir::SeirEngine;
use crate::models::{ScenarioForecast, ScenarioKind, SEIRParameters};

/// Run the three transmission scenarios in parallel
///
/// Scenarios differ only in β (×0.8, ×1.0, ×1.2); results are returned in
/// best, likely, worst order.
#[must_use]
pub fn forecast_scenarios(
    engine: &SeirEngine,
    params: &SEIRParameters,
    horizon_days: i32,
) -> Vec<ScenarioForecast> {
    ScenarioKind::ALL
        .par_iter()
        .map(|&kind| {
            let scenario = SEIRParameters {
                beta: params.beta * kind.beta_multiplier(),
                ..params.clone()
            };
            ScenarioForecast {
                kind,
                beta: scenario.beta,
                forecast: engine.simulate(&scenario, horizon_days),
            }
        })
        .collect()
}
