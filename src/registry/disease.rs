//! Per-disease epidemiological profiles

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::normalize_name;

/// Fixed epidemiological characteristics of one disease
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseProfile {
    /// Canonical name
    pub name: String,
    /// Mean incubation period in days
    pub incubation_period_days: f64,
    /// Basic reproduction number used for spatial spread
    pub r0: f64,
    /// Distance beyond which an outbreak contributes no risk
    pub max_range_km: f64,
    /// Distance the outbreak front advances per day
    pub spread_speed_km_per_day: f64,
}

impl DiseaseProfile {
    /// Create a profile
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        incubation_period_days: f64,
        r0: f64,
        max_range_km: f64,
        spread_speed_km_per_day: f64,
    ) -> Self {
        Self {
            name: name.into(),
            incubation_period_days,
            r0,
            max_range_km,
            spread_speed_km_per_day,
        }
    }

    /// Incubation rate σ = 1 / incubation period
    #[must_use]
    pub fn incubation_rate(&self) -> f64 {
        if self.incubation_period_days > 0.0 {
            1.0 / self.incubation_period_days
        } else {
            1.0
        }
    }
}

/// Immutable lookup from disease name to profile
#[derive(Debug, Clone)]
pub struct DiseaseRegistry {
    profiles: FxHashMap<String, DiseaseProfile>,
    aliases: FxHashMap<String, String>,
    fallback: DiseaseProfile,
}

lazy_static! {
    static ref GLOBAL_REGISTRY: DiseaseRegistry = DiseaseRegistry::built_in();
}

impl DiseaseRegistry {
    /// The built-in registry, shared process-wide
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_REGISTRY
    }

    /// Create a builder starting from an empty table
    #[must_use]
    pub fn builder() -> DiseaseRegistryBuilder {
        DiseaseRegistryBuilder::new()
    }

    /// The built-in table
    #[must_use]
    pub fn built_in() -> Self {
        Self::builder()
            .profile(DiseaseProfile::new("covid-19", 5.2, 2.5, 100.0, 10.0))
            .alias("covid", "covid-19")
            .alias("sars-cov-2", "covid-19")
            .profile(DiseaseProfile::new("influenza", 2.0, 1.3, 80.0, 8.0))
            .alias("flu", "influenza")
            .profile(DiseaseProfile::new("measles", 11.0, 3.0, 60.0, 5.0))
            .profile(DiseaseProfile::new("cholera", 1.4, 1.5, 40.0, 3.0))
            .profile(DiseaseProfile::new("ebola", 9.5, 1.8, 50.0, 2.0))
            .profile(DiseaseProfile::new("dengue", 6.5, 1.2, 15.0, 1.0))
            .alias("dengue-fever", "dengue")
            .profile(DiseaseProfile::new("malaria", 12.0, 1.2, 15.0, 1.0))
            .build()
    }

    /// Profile for a disease, if it is known
    #[must_use]
    pub fn get(&self, disease: &str) -> Option<&DiseaseProfile> {
        let key = normalize_name(disease);
        let key = self.aliases.get(&key).unwrap_or(&key);
        self.profiles.get(key)
    }

    /// Profile for a disease, or the fallback profile for unknown diseases
    #[must_use]
    pub fn profile(&self, disease: &str) -> &DiseaseProfile {
        self.get(disease).unwrap_or(&self.fallback)
    }

    /// Profile used for diseases not in the table
    #[must_use]
    pub const fn fallback(&self) -> &DiseaseProfile {
        &self.fallback
    }

    /// Whether the disease is in the table
    #[must_use]
    pub fn contains(&self, disease: &str) -> bool {
        self.get(disease).is_some()
    }

    /// Canonical names of all known diseases, sorted
    #[must_use]
    pub fn diseases(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Builder for a disease registry
#[derive(Debug, Clone)]
pub struct DiseaseRegistryBuilder {
    profiles: FxHashMap<String, DiseaseProfile>,
    aliases: FxHashMap<String, String>,
    fallback: DiseaseProfile,
}

impl Default for DiseaseRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiseaseRegistryBuilder {
    /// Create a builder with no profiles and the standard fallback
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: FxHashMap::default(),
            aliases: FxHashMap::default(),
            fallback: DiseaseProfile::new("unknown", 5.0, 1.5, 50.0, 5.0),
        }
    }

    /// Add (or replace) a profile, keyed by its normalized name
    #[must_use]
    pub fn profile(mut self, profile: DiseaseProfile) -> Self {
        let key = normalize_name(&profile.name);
        self.profiles.insert(key.clone(), DiseaseProfile { name: key, ..profile });
        self
    }

    /// Register an alternative name for a profile
    #[must_use]
    pub fn alias(mut self, alias: &str, canonical: &str) -> Self {
        self.aliases.insert(normalize_name(alias), normalize_name(canonical));
        self
    }

    /// Replace the profile used for unknown diseases
    #[must_use]
    pub fn fallback(mut self, profile: DiseaseProfile) -> Self {
        self.fallback = profile;
        self
    }

    /// Freeze the table
    #[must_use]
    pub fn build(self) -> DiseaseRegistry {
        DiseaseRegistry {
            profiles: self.profiles,
            aliases: self.aliases,
            fallback: self.fallback,
        }
    }
}
