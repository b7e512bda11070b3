//! Parameter sets and forecast outputs of the SEIR engine

use serde::{Deserialize, Serialize};

/// Inputs of one SEIR simulation run
///
/// Rates are per day. A valid parameter set has `0 < beta, sigma, gamma <= 1`
/// and a population at least as large as the initial compartments; the engine
/// clamps anything outside those bounds before integrating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SEIRParameters {
    /// Total population N
    pub population: f64,
    /// Initially infectious individuals
    pub initial_infected: f64,
    /// Initially exposed (infected, not yet infectious) individuals
    pub initial_exposed: f64,
    /// Initially recovered or removed individuals
    pub initial_recovered: f64,
    /// Transmission rate β
    pub beta: f64,
    /// Incubation rate σ (1 / incubation period)
    pub sigma: f64,
    /// Recovery rate γ (1 / infectious period)
    pub gamma: f64,
}

impl SEIRParameters {
    /// Create a parameter set with no exposed or recovered individuals
    #[must_use]
    pub const fn new(population: f64, initial_infected: f64, beta: f64, sigma: f64, gamma: f64) -> Self {
        Self {
            population,
            initial_infected,
            initial_exposed: 0.0,
            initial_recovered: 0.0,
            beta,
            sigma,
            gamma,
        }
    }

    /// Set the initially exposed count
    #[must_use]
    pub const fn with_initial_exposed(mut self, exposed: f64) -> Self {
        self.initial_exposed = exposed;
        self
    }

    /// Set the initially recovered count
    #[must_use]
    pub const fn with_initial_recovered(mut self, recovered: f64) -> Self {
        self.initial_recovered = recovered;
        self
    }

    /// Basic reproduction number β/γ
    #[must_use]
    pub fn r0(&self) -> f64 {
        self.beta / self.gamma
    }
}

/// Rates estimated by the calibrator for one disease (and optionally region)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedParameters {
    pub disease: String,
    pub region: Option<String>,
    /// Transmission rate β
    pub beta: f64,
    /// Incubation rate σ
    pub sigma: f64,
    /// Recovery rate γ
    pub gamma: f64,
    /// Mean deaths over mean cases in the training data
    pub case_fatality_rate: f64,
    /// Number of historical records the estimate is based on
    pub data_points: usize,
    /// `false` when the documented defaults were returned for lack of data
    pub trained: bool,
}

impl CalibratedParameters {
    /// Basic reproduction number implied by the estimate
    #[must_use]
    pub fn r0(&self) -> f64 {
        self.beta / self.gamma
    }

    /// Combine the estimated rates with initial conditions into a simulation input
    #[must_use]
    pub fn to_seir_parameters(
        &self,
        population: f64,
        initial_infected: f64,
        initial_exposed: f64,
        initial_recovered: f64,
    ) -> SEIRParameters {
        SEIRParameters::new(population, initial_infected, self.beta, self.sigma, self.gamma)
            .with_initial_exposed(initial_exposed)
            .with_initial_recovered(initial_recovered)
    }
}

/// State of all four compartments at the end of one simulated day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationPoint {
    pub day: u32,
    pub susceptible: f64,
    pub exposed: f64,
    pub infected: f64,
    pub recovered: f64,
    /// Individuals becoming infectious per day at this instant (σE)
    pub new_cases: f64,
}

impl SimulationPoint {
    /// Sum of all compartments
    #[must_use]
    pub fn total(&self) -> f64 {
        self.susceptible + self.exposed + self.infected + self.recovered
    }
}

/// Output of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Population the run conserved
    pub population: f64,
    /// One point per day, starting with the initial conditions at day 0
    pub points: Vec<SimulationPoint>,
    /// First day on which the infected compartment peaked
    pub peak_day: u32,
    /// Infected count on the peak day
    pub peak_infected: f64,
    /// β/γ of the parameters the run used
    pub r0: f64,
}

/// Lower and upper bounds around a forecast day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub day: u32,
    /// Relative uncertainty applied on this day
    pub uncertainty: f64,
    pub infected: f64,
    pub infected_lower: f64,
    pub infected_upper: f64,
    pub new_cases: f64,
    pub new_cases_lower: f64,
    pub new_cases_upper: f64,
}

/// Relative uncertainty for the `index`-th of `total` forecast days
///
/// Grows linearly from 10% on the first day towards 30% at the horizon.
#[must_use]
pub fn forecast_uncertainty(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.10;
    }
    0.10 + 0.20 * (index as f64 / total as f64)
}

impl ForecastResult {
    /// Number of simulated days after day 0
    #[must_use]
    pub fn horizon_days(&self) -> u32 {
        self.points.last().map_or(0, |p| p.day)
    }

    /// Cumulative new cases over the whole run (daily σE summed)
    #[must_use]
    pub fn total_new_cases(&self) -> f64 {
        self.points.iter().skip(1).map(|p| p.new_cases).sum()
    }

    /// Confidence bands for infected and new-case counts on every day
    #[must_use]
    pub fn confidence_bands(&self) -> Vec<ConfidenceBand> {
        let total = self.points.len();
        self.points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let uncertainty = forecast_uncertainty(i, total);
                ConfidenceBand {
                    day: point.day,
                    uncertainty,
                    infected: point.infected,
                    infected_lower: point.infected * (1.0 - uncertainty),
                    infected_upper: point.infected * (1.0 + uncertainty),
                    new_cases: point.new_cases,
                    new_cases_lower: point.new_cases * (1.0 - uncertainty),
                    new_cases_upper: point.new_cases * (1.0 + uncertainty),
                }
            })
            .collect()
    }
}

/// Which scenario a forecast represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Transmission reduced by 20%
    Best,
    /// Transmission as estimated
    Likely,
    /// Transmission increased by 20%
    Worst,
}

impl ScenarioKind {
    /// All scenarios, best first
    pub const ALL: [Self; 3] = [Self::Best, Self::Likely, Self::Worst];

    /// Factor applied to β for this scenario
    #[must_use]
    pub const fn beta_multiplier(self) -> f64 {
        match self {
            Self::Best => 0.8,
            Self::Likely => 1.0,
            Self::Worst => 1.2,
        }
    }
}

/// A forecast labelled with the scenario that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioForecast {
    pub kind: ScenarioKind,
    /// β actually simulated after applying the scenario multiplier
    pub beta: f64,
    pub forecast: ForecastResult,
}
