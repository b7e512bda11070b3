use crate::utils::{daily_reports, march};
use epi_forecast::algorithm::AnomalyDetector;
use epi_forecast::models::{AnomalyStatus, Significance};
use epi_forecast::{SurveillanceConfig, SymptomReport, detect_anomalies};

#[test]
fn test_flat_series_has_no_anomalies() {
    let mut reports = daily_reports("clinic-7", "cough", 1..=30, 2);
    reports.extend(daily_reports("clinic-7", "fever", 1..=30, 1));

    let report = detect_anomalies("clinic-7", &reports, 30, march(30));
    assert_eq!(report.status, AnomalyStatus::Completed);
    assert_eq!(report.total_reports, 90);
    assert_eq!(report.symptoms_analyzed, 2);
    assert!(!report.has_anomalies());
}

#[test]
fn test_fewer_than_ten_reports_is_insufficient() {
    let reports = daily_reports("clinic-7", "rash", 22..=30, 1);
    let report = detect_anomalies("clinic-7", &reports, 30, march(30));
    assert_eq!(
        report.status,
        AnomalyStatus::InsufficientData {
            reports_found: 9,
            required: 10,
        }
    );
    assert!(report.anomalies.is_empty());
}

#[test]
fn test_sharp_rise_over_long_window_is_highly_significant() {
    // 57 quiet days followed by three busy ones; z = sqrt(57 / 3) ≈ 4.36
    let as_of = chrono::NaiveDate::from_ymd_opt(2024, 4, 29).unwrap();
    let start = as_of - chrono::Days::new(59);
    let mut reports: Vec<SymptomReport> = (0..57)
        .map(|offset| SymptomReport::new("ward-b", start + chrono::Days::new(offset), ["diarrhea"]))
        .collect();
    for offset in 57..60 {
        for _ in 0..10 {
            reports.push(SymptomReport::new("ward-b", start + chrono::Days::new(offset), ["Diarrhea", "fever"]));
        }
    }
    // one earlier fever case makes that series less extreme than diarrhea
    reports.push(SymptomReport::new("ward-b", start, ["fever"]));
    // steady background symptom
    for offset in 0..60 {
        reports.push(SymptomReport::new("ward-b", start + chrono::Days::new(offset), ["headache"]));
    }

    let report = detect_anomalies("ward-b", &reports, 60, as_of);
    assert_eq!(report.status, AnomalyStatus::Completed);
    assert_eq!(report.symptoms_analyzed, 3);

    let symptoms: Vec<&str> = report.anomalies.iter().map(|a| a.symptom.as_str()).collect();
    assert_eq!(symptoms, vec!["diarrhea", "fever"]);

    let diarrhea = &report.anomalies[0];
    assert!((diarrhea.z_score - 19.0_f64.sqrt()).abs() < 1e-9);
    assert_eq!(diarrhea.significance, Significance::High);
    assert!(diarrhea.p_value < 0.001);
    let fever = &report.anomalies[1];
    assert!(fever.z_score < diarrhea.z_score);
    assert_eq!(fever.significance, Significance::High);
}

#[test]
fn test_thresholds_come_from_config() {
    let mut reports = daily_reports("clinic-7", "cough", 1..=27, 1);
    reports.extend(daily_reports("clinic-7", "cough", 28..=30, 2));

    // z = 3 for this two-level series, below a raised threshold
    let strict = AnomalyDetector::new(SurveillanceConfig {
        anomaly_z: 3.5,
        ..SurveillanceConfig::default()
    });
    assert!(!strict.detect("clinic-7", &reports, 30, march(30)).has_anomalies());

    let relaxed = AnomalyDetector::new(SurveillanceConfig {
        min_reports: 100,
        ..SurveillanceConfig::default()
    });
    assert!(matches!(
        relaxed.detect("clinic-7", &reports, 30, march(30)).status,
        AnomalyStatus::InsufficientData { reports_found: 33, required: 100 }
    ));

    assert!(AnomalyDetector::default().detect("clinic-7", &reports, 30, march(30)).has_anomalies());
}
