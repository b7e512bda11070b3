use crate::utils::{feverx_records, mixed_records};
use epi_forecast::algorithm::validation::{mae, mape, r_squared, rmse};
use epi_forecast::models::ModelQuality;
use epi_forecast::{CrossValidator, ValidationConfig, ValidationOutcome, cross_validate, cross_validate_all};

#[test]
fn test_too_few_records_is_insufficient_data() {
    let records = feverx_records();
    let outcome = cross_validate("FeverX", 6, &records);
    assert_eq!(
        outcome,
        ValidationOutcome::InsufficientData {
            disease: "FeverX".to_string(),
            data_points: 5,
            required: 6,
        }
    );
    assert!(outcome.report().is_none());

    let outcome = cross_validate("measles", 5, &records);
    assert_eq!(outcome.data_points(), 0);
}

#[test]
fn test_folds_cover_every_record_once() {
    let records = mixed_records();
    let outcome = cross_validate("influenza", 5, &records);
    let report = outcome.report().expect("influenza has seven records");

    assert_eq!(report.folds, 5);
    assert_eq!(report.data_points, 7);
    let test_sizes: Vec<usize> = report.fold_results.iter().map(|f| f.test_size).collect();
    assert_eq!(test_sizes, vec![2, 2, 1, 1, 1]);
    for fold in &report.fold_results {
        assert_eq!(fold.training_size + fold.test_size, 7);
        assert_eq!(fold.predicted.len(), fold.test_size);
        assert_eq!(fold.actual.len(), fold.test_size);
    }

    let mut actual: Vec<f64> = report
        .fold_results
        .iter()
        .flat_map(|f| f.actual.iter().copied())
        .collect();
    actual.sort_by(f64::total_cmp);
    assert_eq!(actual, vec![400.0, 640.0, 800.0, 950.0, 1200.0, 1500.0, 2200.0]);
}

#[test]
fn test_seeded_shuffle_is_reproducible() {
    let records = mixed_records();
    let parallel = ValidationConfig::builder().random_seed(7).build();
    let sequential = ValidationConfig::builder()
        .random_seed(7)
        .use_parallel(false)
        .build();

    let a = CrossValidator::new(parallel.clone()).cross_validate("cholera", &records);
    let b = CrossValidator::new(parallel).cross_validate("cholera", &records);
    let c = CrossValidator::new(sequential).cross_validate("cholera", &records);
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(a.report().map(|r| r.random_seed), Some(7));
}

#[test]
fn test_quality_follows_mean_mape() {
    let records = mixed_records();
    let outcome = cross_validate("cholera", 3, &records);
    let report = outcome.report().expect("cholera has six records");
    assert!(report.mean_metrics.mape >= 0.0);
    assert!(report.mean_metrics.rmse >= report.mean_metrics.mae - 1e-9);
    assert_eq!(report.quality, ModelQuality::from_mape(report.mean_metrics.mape));
    assert!(report.summary().contains("Fold | Train | Test"));
}

#[test]
fn test_all_diseases_sorted_by_name() {
    let records = mixed_records();
    let outcomes = cross_validate_all(&records, 5);
    let diseases: Vec<&str> = outcomes.iter().map(ValidationOutcome::disease).collect();
    assert_eq!(diseases, vec!["cholera", "ebola", "influenza"]);

    assert!(outcomes[0].report().is_some());
    assert_eq!(
        outcomes[1],
        ValidationOutcome::InsufficientData {
            disease: "ebola".to_string(),
            data_points: 1,
            required: 5,
        }
    );
    assert!(outcomes[2].report().is_some());
}

#[test]
fn test_metrics_on_known_series() {
    let predicted = [110.0, 190.0, 300.0];
    let actual = [100.0, 200.0, 300.0];
    assert!((mae(&predicted, &actual) - 20.0 / 3.0).abs() < 1e-12);
    assert!((rmse(&predicted, &actual) - (200.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    assert!((mape(&predicted, &actual) - 5.0).abs() < 1e-12);
    assert!((r_squared(&predicted, &actual) - (1.0 - 200.0 / 20_000.0)).abs() < 1e-12);

    // constant actuals
    assert_eq!(r_squared(&[5.0, 5.0], &[5.0, 5.0]), 1.0);
    assert_eq!(r_squared(&[4.0, 6.0], &[5.0, 5.0]), 0.0);
}
