//! Region healthcare-quality index

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use super::normalize_name;

/// Lowest accepted quality multiplier
pub const MIN_QUALITY: f64 = 0.5;
/// Highest accepted quality multiplier
pub const MAX_QUALITY: f64 = 1.5;

/// Multiplier on the recovery rate per region; 1.0 is the reference system
///
/// Better healthcare shortens the effective infectious period, so regions
/// above 1.0 recover faster than the raw historical estimate suggests.
#[derive(Debug, Clone, Default)]
pub struct HealthcareQualityIndex {
    regions: FxHashMap<String, f64>,
}

lazy_static! {
    static ref GLOBAL_INDEX: HealthcareQualityIndex = HealthcareQualityIndex::built_in();
}

impl HealthcareQualityIndex {
    /// The built-in index, shared process-wide
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_INDEX
    }

    /// Create a builder starting from an empty index
    #[must_use]
    pub fn builder() -> HealthcareQualityIndexBuilder {
        HealthcareQualityIndexBuilder::default()
    }

    /// The built-in index
    #[must_use]
    pub fn built_in() -> Self {
        Self::builder()
            .region("europe", 1.25)
            .region("north-america", 1.2)
            .region("oceania", 1.2)
            .region("east-asia", 1.15)
            .region("middle-east", 1.0)
            .region("latin-america", 0.95)
            .region("south-america", 0.95)
            .region("southeast-asia", 0.9)
            .region("south-asia", 0.85)
            .region("north-africa", 0.85)
            .region("sub-saharan-africa", 0.7)
            .build()
    }

    /// Quality multiplier for a region, if known
    #[must_use]
    pub fn quality(&self, region: &str) -> Option<f64> {
        self.regions.get(&normalize_name(region)).copied()
    }

    /// Number of regions in the index
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the index is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Builder for a healthcare-quality index
#[derive(Debug, Clone, Default)]
pub struct HealthcareQualityIndexBuilder {
    regions: FxHashMap<String, f64>,
}

impl HealthcareQualityIndexBuilder {
    /// Add a region; the multiplier is clamped to [0.5, 1.5]
    #[must_use]
    pub fn region(mut self, region: &str, quality: f64) -> Self {
        let clamped = quality.clamp(MIN_QUALITY, MAX_QUALITY);
        if (clamped - quality).abs() > f64::EPSILON {
            crate::utils::logging::log_clamp("healthcare quality", quality, clamped);
        }
        self.regions.insert(normalize_name(region), clamped);
        self
    }

    /// Freeze the index
    #[must_use]
    pub fn build(self) -> HealthcareQualityIndex {
        HealthcareQualityIndex {
            regions: self.regions,
        }
    }
}
