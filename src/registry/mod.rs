//! Static reference tables shared by the forecasting components
//!
//! Both tables are built once, on first use, and are never mutated afterwards.
//! Callers with their own tables construct a registry through the builders and
//! pass it to the component that needs it.

pub mod disease;
pub mod healthcare;

pub use disease::{DiseaseProfile, DiseaseRegistry, DiseaseRegistryBuilder};
pub use healthcare::{HealthcareQualityIndex, HealthcareQualityIndexBuilder};

/// Canonical form of a free-text disease or region name
///
/// Lower case, trimmed, with runs of spaces and underscores collapsed to `-`,
/// so "COVID 19", "covid_19" and "Covid-19" all resolve to the same key.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in name.trim().chars() {
        if c == ' ' || c == '_' || c == '-' {
            pending_separator = !normalized.is_empty();
            continue;
        }
        if pending_separator {
            normalized.push('-');
            pending_separator = false;
        }
        normalized.extend(c.to_lowercase());
    }
    normalized
}
