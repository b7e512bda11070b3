//! Deterministic SEIR simulation
//!
//! Integrates the classic compartmental model
//!
//! ```text
//! dS = -βSI/N    dE = βSI/N - σE    dI = σE - γI    dR = γI
//! ```
//!
//! with a fixed-step Euler scheme. Each sub-step moves individuals between
//! compartments as transfers bounded by the source compartment, then floors
//! every compartment at zero and caps R at N, so the run stays physically
//! valid and conserves the population.

use log::debug;

use crate::config::SimulationConfig;
use crate::models::{ForecastResult, SEIRParameters, SimulationPoint};
use crate::utils::log_clamp;

/// Smallest rate the engine will integrate with
pub const MIN_RATE: f64 = 1e-4;
/// Largest rate the engine will integrate with
pub const MAX_RATE: f64 = 1.0;
/// Share of the population placed in E when the initial compartments overflow N
const OVERFLOW_EXPOSED_SHARE: f64 = 0.001;

#[derive(Debug, Clone, Copy)]
struct Compartments {
    susceptible: f64,
    exposed: f64,
    infected: f64,
    recovered: f64,
}

/// Fixed-step SEIR integrator
#[derive(Debug, Clone, Default)]
pub struct SeirEngine {
    config: SimulationConfig,
}

impl SeirEngine {
    /// Create an engine with the given configuration
    #[must_use]
    pub const fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Days to simulate: non-positive horizons yield 0, long ones the configured maximum
    fn horizon(&self, horizon_days: i32) -> u32 {
        let days = u32::try_from(horizon_days).unwrap_or(0);
        let max = self.config.max_horizon_days;
        if days > max {
            log_clamp("horizon days", f64::from(days), f64::from(max));
            max
        } else {
            days
        }
    }

    /// Simulate `horizon_days` days from the given parameters
    ///
    /// Day 0 holds the initial conditions; a non-positive horizon returns only
    /// that point and horizons beyond `max_horizon_days` are shortened.
    /// Out-of-range parameters are clamped before integrating.
    #[must_use]
    pub fn simulate(&self, params: &SEIRParameters, horizon_days: i32) -> ForecastResult {
        let params = sanitize(params);
        let population = params.population;
        let mut state = initial_state(&params);

        let days = self.horizon(horizon_days);
        let sub_steps = self.config.sub_steps_per_day.max(1);
        let dt = 1.0 / f64::from(sub_steps);

        let mut points = Vec::with_capacity(days as usize + 1);
        points.push(record(0, &state, params.sigma));

        for day in 1..=days {
            for _ in 0..sub_steps {
                state = euler_step(state, &params, dt);
            }
            points.push(record(day, &state, params.sigma));
        }

        let (peak_day, peak_infected) = points
            .iter()
            .fold((0, f64::NEG_INFINITY), |(best_day, best), p| {
                if p.infected > best {
                    (p.day, p.infected)
                } else {
                    (best_day, best)
                }
            });

        debug!(
            "Simulated {days} days for N={population}: peak {peak_infected:.1} infected on day {peak_day}"
        );

        ForecastResult {
            population,
            points,
            peak_day,
            peak_infected,
            r0: params.beta / params.gamma,
        }
    }
}

/// Simulate with the default configuration
#[must_use]
pub fn simulate(params: &SEIRParameters, horizon_days: i32) -> ForecastResult {
    SeirEngine::default().simulate(params, horizon_days)
}

/// Force every parameter into its valid range
fn sanitize(params: &SEIRParameters) -> SEIRParameters {
    let population = if params.population.is_finite() && params.population >= 1.0 {
        params.population
    } else {
        log_clamp("population", params.population, 1.0);
        1.0
    };

    SEIRParameters {
        population,
        initial_infected: non_negative("initial infected", params.initial_infected),
        initial_exposed: non_negative("initial exposed", params.initial_exposed),
        initial_recovered: non_negative("initial recovered", params.initial_recovered),
        beta: clamp_rate("beta", params.beta),
        sigma: clamp_rate("sigma", params.sigma),
        gamma: clamp_rate("gamma", params.gamma),
    }
}

fn clamp_rate(name: &str, value: f64) -> f64 {
    let clamped = if value.is_nan() {
        MIN_RATE
    } else {
        value.clamp(MIN_RATE, MAX_RATE)
    };
    if clamped != value {
        log_clamp(name, value, clamped);
    }
    clamped
}

fn non_negative(name: &str, value: f64) -> f64 {
    if value >= 0.0 && value.is_finite() {
        value
    } else {
        log_clamp(name, value, 0.0);
        0.0
    }
}

/// Initial compartments, repaired so that they sum to N
fn initial_state(params: &SEIRParameters) -> Compartments {
    let population = params.population;

    // An epidemic needs at least one infectious individual to start
    let mut infected = if params.initial_infected > 0.0 {
        params.initial_infected
    } else {
        1.0
    };
    let mut exposed = params.initial_exposed;
    let mut recovered = params.initial_recovered;
    let mut susceptible = population - infected - exposed - recovered;

    if susceptible < 0.0 {
        debug!("Initial compartments exceed population {population}; resetting exposed and recovered");
        exposed = population * OVERFLOW_EXPOSED_SHARE;
        recovered = 0.0;
        susceptible = population - infected - exposed;
        if susceptible < 0.0 {
            infected = population - exposed;
            susceptible = 0.0;
        }
    }

    Compartments {
        susceptible,
        exposed,
        infected,
        recovered,
    }
}

fn euler_step(state: Compartments, params: &SEIRParameters, dt: f64) -> Compartments {
    let n = params.population;

    let infection = (params.beta * state.susceptible * state.infected / n * dt).min(state.susceptible);
    let incubation = (params.sigma * state.exposed * dt).min(state.exposed);
    let recovery = (params.gamma * state.infected * dt).min(state.infected);

    Compartments {
        susceptible: (state.susceptible - infection).max(0.0),
        exposed: (state.exposed + infection - incubation).max(0.0),
        infected: (state.infected + incubation - recovery).max(0.0),
        recovered: (state.recovered + recovery).clamp(0.0, n),
    }
}

fn record(day: u32, state: &Compartments, sigma: f64) -> SimulationPoint {
    SimulationPoint {
        day,
        susceptible: state.susceptible,
        exposed: state.exposed,
        infected: state.infected,
        recovered: state.recovered,
        new_cases: sigma * state.exposed,
    }
}
