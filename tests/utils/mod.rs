use std::path::PathBuf;

use chrono::NaiveDate;
use epi_forecast::{HistoricalOutbreakRecord, OutbreakLocation, SymptomReport};

/// Kilometres spanned by one degree of longitude on the equator
#[must_use]
pub fn km_per_degree_equator() -> f64 {
    epi_forecast::algorithm::spread::EARTH_RADIUS_KM.to_radians()
}

/// Scratch file path under the system temp directory, unique per test
#[must_use]
pub fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("epi-forecast-{}-{name}", std::process::id()))
}

/// Five identical FeverX outbreaks (100 cases, 2 deaths, 30 days)
#[must_use]
pub fn feverx_records() -> Vec<HistoricalOutbreakRecord> {
    (0..5)
        .map(|i| HistoricalOutbreakRecord::new("FeverX", "test-region", 2015 + i, 6, 100, 2, 30))
        .collect()
}

/// Mixed historical dataset covering several diseases and regions
#[must_use]
pub fn mixed_records() -> Vec<HistoricalOutbreakRecord> {
    let mut records = Vec::new();
    for (i, cases) in [800_u64, 1200, 950, 400, 2200, 1500, 640].into_iter().enumerate() {
        let year = 2010 + i as i32;
        records.push(HistoricalOutbreakRecord::new(
            "influenza",
            if i % 2 == 0 { "europe" } else { "south-asia" },
            year,
            1 + (i as u32 % 12),
            cases,
            cases / 100,
            14 + 3 * i as u32,
        ));
    }
    for (i, cases) in [300_u64, 520, 180, 260, 90, 410].into_iter().enumerate() {
        records.push(HistoricalOutbreakRecord::new(
            "cholera",
            "sub-saharan-africa",
            2012 + i as i32,
            8,
            cases,
            cases / 20,
            21 + 2 * i as u32,
        ));
    }
    records.push(HistoricalOutbreakRecord::new("ebola", "sub-saharan-africa", 2014, 3, 2800, 1100, 120));
    records
}

/// Outbreak of the given disease on the equator at a longitude
#[must_use]
pub fn equator_outbreak(disease: &str, longitude: f64, case_count: u64, severity: f64) -> OutbreakLocation {
    OutbreakLocation::new(0.0, longitude, case_count, disease, severity)
}

/// `per_day` reports of one symptom on each day of March 2024 in `days`
#[must_use]
pub fn daily_reports(
    location: &str,
    symptom: &str,
    days: std::ops::RangeInclusive<u32>,
    per_day: usize,
) -> Vec<SymptomReport> {
    days.flat_map(|day| {
        (0..per_day).map(move |_| SymptomReport::new(location, march(day), [symptom]))
    })
    .collect()
}

/// Date in March 2024
#[must_use]
pub fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).expect("valid March date")
}
