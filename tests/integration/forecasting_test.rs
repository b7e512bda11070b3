use crate::utils::{feverx_records, mixed_records};
use epi_forecast::algorithm::forecasting::forecast_scenarios;
use epi_forecast::models::ScenarioKind;
use epi_forecast::{SEIRParameters, SeirEngine, calibrate, simulate};

fn assert_conserved(params: &SEIRParameters, horizon: i32) {
    let forecast = simulate(params, horizon);
    let n = forecast.population;
    for point in &forecast.points {
        assert!(point.susceptible >= 0.0, "S < 0 on day {}", point.day);
        assert!(point.exposed >= 0.0, "E < 0 on day {}", point.day);
        assert!(point.infected >= 0.0, "I < 0 on day {}", point.day);
        assert!(point.recovered >= 0.0, "R < 0 on day {}", point.day);
        assert!(
            ((point.total() - n) / n).abs() <= 1e-6,
            "population drifted to {} on day {}",
            point.total(),
            point.day
        );
    }
}

#[test]
fn test_population_is_conserved_across_parameter_grid() {
    for &population in &[1.0, 500.0, 1.0e6] {
        for &beta in &[0.05, 0.4, 1.0] {
            for &gamma in &[0.05, 0.3, 1.0] {
                let params = SEIRParameters::new(population, population * 0.01, beta, 0.2, gamma)
                    .with_initial_exposed(population * 0.02);
                assert_conserved(&params, 120);
            }
        }
    }
}

#[test]
fn test_out_of_range_inputs_still_conserve() {
    let params = SEIRParameters::new(-50.0, 1.0e9, 7.0, -1.0, f64::NAN)
        .with_initial_exposed(1.0e9)
        .with_initial_recovered(-3.0);
    assert_conserved(&params, 30);

    let unbounded = SEIRParameters::new(f64::INFINITY, 10.0, 0.3, 0.2, 0.1);
    assert_eq!(simulate(&unbounded, 3).population, 1.0);
    assert_conserved(&unbounded, 3);
}

#[test]
fn test_r0_is_beta_over_gamma() {
    for &(beta, gamma) in &[(0.4, 0.1), (0.25, 0.2), (0.8, 0.05), (0.3, 0.3)] {
        let forecast = simulate(&SEIRParameters::new(1.0e5, 10.0, beta, 0.2, gamma), 10);
        assert_eq!(forecast.r0, beta / gamma);
    }
}

#[test]
fn test_calibrate_empty_returns_defaults() {
    let parameters = calibrate("influenza", Some("europe"), &[]);
    assert!(!parameters.trained);
    assert_eq!(parameters.data_points, 0);
    assert_eq!(parameters.beta, 0.4);
    assert_eq!(parameters.sigma, 0.2);
    assert_eq!(parameters.gamma, 0.1);
}

#[test]
fn test_calibrate_non_empty_is_trained_and_in_range() {
    let records = mixed_records();
    for disease in ["influenza", "cholera", "ebola"] {
        for region in [None, Some("europe"), Some("atlantis")] {
            let parameters = calibrate(disease, region, &records);
            assert!(parameters.trained, "{disease} {region:?}");
            assert!((0.2..=0.8).contains(&parameters.beta));
            assert!((0.05..=0.3).contains(&parameters.gamma));
        }
    }
}

#[test]
fn test_feverx_end_to_end() {
    let records = feverx_records();
    let parameters = calibrate("FeverX", None, &records);

    assert!(parameters.trained);
    assert_eq!(parameters.data_points, 5);
    assert!((0.05..=0.3).contains(&parameters.gamma));
    assert!((0.2..=0.8).contains(&parameters.beta));
    // growth rate is 1, so the raw β of 0.147 is raised to the floor
    assert_eq!(parameters.beta, 0.2);
    assert!((parameters.gamma - 0.098).abs() < 1e-12);
    assert!((parameters.case_fatality_rate - 0.02).abs() < 1e-12);

    let seir = parameters.to_seir_parameters(1000.0, 10.0, 0.0, 0.0);
    let forecast = simulate(&seir, 60);
    assert_eq!(forecast.points.len(), 61);
    assert!(forecast.peak_day <= 60);
    assert_conserved(&seir, 60);
}

#[test]
fn test_scenarios_are_ordered_by_severity() {
    let params = SEIRParameters::new(50_000.0, 20.0, 0.35, 0.2, 0.1);
    let scenarios = forecast_scenarios(&SeirEngine::default(), &params, 90);

    let kinds: Vec<_> = scenarios.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, ScenarioKind::ALL.to_vec());
    assert!(scenarios[0].forecast.peak_infected < scenarios[1].forecast.peak_infected);
    assert!(scenarios[1].forecast.peak_infected < scenarios[2].forecast.peak_infected);
    assert_eq!(scenarios[1].forecast, simulate(&params, 90));
}

#[test]
fn test_confidence_bands_widen() {
    let forecast = simulate(&SEIRParameters::new(10_000.0, 10.0, 0.4, 0.2, 0.1), 30);
    let bands = forecast.confidence_bands();
    assert_eq!(bands.len(), forecast.points.len());
    assert!((bands[0].uncertainty - 0.10).abs() < 1e-12);
    assert!(bands.windows(2).all(|w| w[1].uncertainty > w[0].uncertainty));
    for band in &bands {
        assert!(band.infected_lower <= band.infected && band.infected <= band.infected_upper);
    }
}
