use std::sync::Arc;
use std::time::Duration;

use crate::utils::{daily_reports, equator_outbreak, march, mixed_records};
use epi_forecast::async_io::{
    cross_validate_async, cross_validate_many_async, detect_anomalies_async, predict_spread_async,
};
use epi_forecast::{
    GeoBounds, SpreadConfig, SurveillanceConfig, ValidationConfig, cross_validate, detect_anomalies,
    predict_spread,
};

const GENEROUS: Duration = Duration::from_secs(60);

#[tokio::test]
async fn test_async_validation_matches_sync() -> epi_forecast::Result<()> {
    let records = mixed_records();
    let expected = cross_validate("influenza", 5, &records);
    let actual = cross_validate_async(
        "influenza".to_string(),
        Arc::from(records),
        ValidationConfig::default(),
        GENEROUS,
    )
    .await?;
    assert_eq!(actual, expected);
    Ok(())
}

#[tokio::test]
async fn test_many_diseases_concurrently() -> epi_forecast::Result<()> {
    let records: Arc<[_]> = Arc::from(mixed_records());
    let diseases = vec!["influenza".to_string(), "cholera".to_string(), "ebola".to_string()];
    let outcomes =
        cross_validate_many_async(diseases, Arc::clone(&records), ValidationConfig::default(), GENEROUS)
            .await?;

    let names: Vec<&str> = outcomes.iter().map(|o| o.disease()).collect();
    assert_eq!(names, vec!["cholera", "ebola", "influenza"]);
    assert_eq!(outcomes[2], cross_validate("influenza", 5, &records));
    Ok(())
}

#[tokio::test]
async fn test_async_spread_and_surveillance() -> epi_forecast::Result<()> {
    let outbreaks = vec![equator_outbreak("cholera", 0.0, 300, 3.0)];
    let bounds = GeoBounds::new(-0.5, 0.5, -0.5, 0.5);
    let prediction =
        predict_spread_async(outbreaks.clone(), bounds, SpreadConfig::default(), GENEROUS).await?;
    assert_eq!(prediction, predict_spread(&outbreaks, &bounds));

    let reports = daily_reports("clinic-7", "fever", 1..=30, 1);
    let report = detect_anomalies_async(
        "clinic-7".to_string(),
        reports.clone(),
        30,
        march(30),
        SurveillanceConfig::default(),
        GENEROUS,
    )
    .await?;
    assert_eq!(report, detect_anomalies("clinic-7", &reports, 30, march(30)));
    Ok(())
}

#[tokio::test]
async fn test_expired_deadline_is_timeout_error() {
    let outbreaks = vec![equator_outbreak("covid-19", 0.0, 1000, 5.0)];
    let bounds = GeoBounds::new(-40.0, 40.0, -40.0, 40.0);
    let result = predict_spread_async(outbreaks, bounds, SpreadConfig::default(), Duration::ZERO).await;
    assert!(matches!(
        result,
        Err(epi_forecast::ForecastError::Timeout { .. })
    ));
}
