//! Configuration for the forecasting engine.
//!
//! Every component reads its tunables from one of the structs below. All of
//! them carry the documented defaults, so `EngineConfig::default()` reproduces
//! the reference behaviour exactly.

use log::warn;

/// Configuration for the SEIR simulation engine
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of Euler sub-steps integrated per simulated day
    pub sub_steps_per_day: u32,
    /// Longest horizon simulated; longer requests are shortened to this
    pub max_horizon_days: u32,
}

/// Default upper bound on the simulated horizon (ten years)
pub const DEFAULT_MAX_HORIZON_DAYS: u32 = 3650;

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sub_steps_per_day: 10,
            max_horizon_days: DEFAULT_MAX_HORIZON_DAYS,
        }
    }
}

/// Configuration for the parameter calibrator
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationConfig {
    /// Transmission rate returned when no historical data is available
    pub default_beta: f64,
    /// Incubation rate returned when no historical data is available
    pub default_sigma: f64,
    /// Recovery rate returned when no historical data is available
    pub default_gamma: f64,
    /// Allowed range for the estimated transmission rate
    pub beta_range: (f64, f64),
    /// Allowed range for the estimated recovery rate
    pub gamma_range: (f64, f64),
    /// Multiplier turning growth × recovery into a transmission rate
    pub r0_heuristic: f64,
    /// Whether to scale recovery by the region's healthcare-quality index
    pub apply_healthcare_quality: bool,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            default_beta: 0.4,
            default_sigma: 0.2,
            default_gamma: 0.1,
            beta_range: (0.2, 0.8),
            gamma_range: (0.05, 0.3),
            r0_heuristic: 1.5,
            apply_healthcare_quality: true,
        }
    }
}

/// Configuration for k-fold cross-validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Number of folds
    pub folds: usize,
    /// Seed for the shuffle that precedes fold assignment
    pub random_seed: u64,
    /// Fraction of a held-out record's case count used as initial infected
    pub initial_infected_fraction: f64,
    /// Population simulated for a held-out record, as a multiple of its case count
    pub population_multiplier: f64,
    /// Whether folds and diseases are evaluated on the rayon pool
    pub use_parallel: bool,
    /// Calibration settings used when retraining on each fold
    pub calibration: CalibrationConfig,
    /// Simulation settings used when scoring held-out records
    pub simulation: SimulationConfig,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            folds: 5,
            random_seed: 42,
            initial_infected_fraction: 0.1,
            population_multiplier: 10.0,
            use_parallel: true,
            calibration: CalibrationConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl ValidationConfig {
    /// Create a new builder for constructing validation configuration
    #[must_use]
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::new()
    }
}

/// Builder for constructing validation configuration
#[derive(Debug, Clone, Default)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of folds
    #[must_use]
    pub const fn folds(mut self, folds: usize) -> Self {
        self.config.folds = folds;
        self
    }

    /// Set the shuffle seed
    #[must_use]
    pub const fn random_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = seed;
        self
    }

    /// Set the initial infected fraction for held-out simulations
    #[must_use]
    pub const fn initial_infected_fraction(mut self, fraction: f64) -> Self {
        self.config.initial_infected_fraction = fraction;
        self
    }

    /// Set the population multiplier for held-out simulations
    #[must_use]
    pub const fn population_multiplier(mut self, multiplier: f64) -> Self {
        self.config.population_multiplier = multiplier;
        self
    }

    /// Set whether to use parallel processing
    #[must_use]
    pub const fn use_parallel(mut self, parallel: bool) -> Self {
        self.config.use_parallel = parallel;
        self
    }

    /// Set the calibration settings
    #[must_use]
    pub fn calibration(mut self, calibration: CalibrationConfig) -> Self {
        self.config.calibration = calibration;
        self
    }

    /// Set the simulation settings
    #[must_use]
    pub fn simulation(mut self, simulation: SimulationConfig) -> Self {
        self.config.simulation = simulation;
        self
    }

    /// Build the validation configuration
    #[must_use]
    pub fn build(self) -> ValidationConfig {
        self.config
    }
}

/// Configuration for the geographic spread predictor
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadConfig {
    /// Sample points per axis of the ranking grid
    pub grid_points_per_axis: usize,
    /// Approximate cell size of the heatmap grid
    pub heatmap_resolution_km: f64,
    /// Heatmap cells at or below this risk are dropped
    pub heatmap_min_risk: f64,
    /// Upper bound on heatmap cells along either axis
    pub max_heatmap_cells_per_axis: usize,
    /// Ranking samples this close to an outbreak centre are skipped
    pub exclusion_radius_km: f64,
    /// Days added to travel time to account for incubation
    pub onset_offset_days: f64,
    /// Share of the dominant outbreak's cases expected to transmit onwards
    pub onward_transmission_fraction: f64,
    /// Minimum risk for the high bucket
    pub high_risk_threshold: f64,
    /// Minimum risk for the medium bucket
    pub medium_risk_threshold: f64,
    /// Minimum risk for the low bucket
    pub low_risk_threshold: f64,
    /// Maximum number of high-risk areas returned
    pub high_risk_limit: usize,
    /// Maximum number of medium-risk areas returned
    pub medium_risk_limit: usize,
    /// Maximum number of low-risk areas returned
    pub low_risk_limit: usize,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            grid_points_per_axis: 21,
            heatmap_resolution_km: 5.0,
            heatmap_min_risk: 0.5,
            max_heatmap_cells_per_axis: 400,
            exclusion_radius_km: 2.0,
            onset_offset_days: 2.0,
            onward_transmission_fraction: 0.3,
            high_risk_threshold: 7.0,
            medium_risk_threshold: 5.0,
            low_risk_threshold: 4.0,
            high_risk_limit: 10,
            medium_risk_limit: 15,
            low_risk_limit: 10,
        }
    }
}

/// Configuration for symptom surveillance
#[derive(Debug, Clone, PartialEq)]
pub struct SurveillanceConfig {
    /// Default lookback window in days
    pub lookback_days: u32,
    /// Number of trailing days averaged into the "recent" count
    pub recent_window_days: u32,
    /// Minimum number of reports for a location before detection runs
    pub min_reports: usize,
    /// z-score above which a symptom is flagged
    pub anomaly_z: f64,
    /// z-score above which a flagged symptom is highly significant
    pub high_z: f64,
}

impl Default for SurveillanceConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            recent_window_days: 3,
            min_reports: 10,
            anomaly_z: 2.0,
            high_z: 3.0,
        }
    }
}

/// Configuration for the whole engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub simulation: SimulationConfig,
    pub calibration: CalibrationConfig,
    pub validation: ValidationConfig,
    pub spread: SpreadConfig,
    pub surveillance: SurveillanceConfig,
}

/// Environment variable overriding the cross-validation seed
pub const ENV_CV_SEED: &str = "EPI_CV_SEED";
/// Environment variable overriding the cross-validation fold count
pub const ENV_CV_FOLDS: &str = "EPI_CV_FOLDS";
/// Environment variable overriding the SEIR sub-step count
pub const ENV_SUB_STEPS: &str = "EPI_SUB_STEPS";
/// Environment variable overriding the surveillance lookback window
pub const ENV_LOOKBACK_DAYS: &str = "EPI_LOOKBACK_DAYS";

impl EngineConfig {
    /// Default configuration with any overrides found in the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup function
    ///
    /// Values that fail to parse are ignored with a warning.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = parse_override::<u64>(&lookup, ENV_CV_SEED) {
            self.validation.random_seed = seed;
        }
        if let Some(folds) = parse_override::<usize>(&lookup, ENV_CV_FOLDS) {
            self.validation.folds = folds;
        }
        if let Some(steps) = parse_override::<u32>(&lookup, ENV_SUB_STEPS) {
            self.simulation.sub_steps_per_day = steps;
            self.validation.simulation.sub_steps_per_day = steps;
        }
        if let Some(days) = parse_override::<u32>(&lookup, ENV_LOOKBACK_DAYS) {
            self.surveillance.lookback_days = days;
        }
        self.validation.calibration = self.calibration.clone();
        self
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable value for {key}: {raw:?}");
            None
        }
    }
}
