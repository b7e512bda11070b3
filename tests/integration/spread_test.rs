use crate::utils::{equator_outbreak, km_per_degree_equator};
use epi_forecast::algorithm::spread::base_risk;
use epi_forecast::{
    DiseaseRegistry, GeoBounds, RiskLevel, SpreadConfig, SpreadPredictor, haversine_distance_km,
    predict_spread,
};

#[test]
fn test_risk_at_source_is_base_times_half_r0() {
    let predictor = SpreadPredictor::default();
    let r0 = DiseaseRegistry::global().profile("covid-19").r0;

    // 20 cases at severity 2.5 gives a base risk of 2
    let outbreak = equator_outbreak("covid-19", 10.0, 20, 2.5);
    assert_eq!(base_risk(&outbreak), 2.0);
    let at_source = predictor.risk_at(std::slice::from_ref(&outbreak), 0.0, 10.0);
    assert!((at_source - 2.0 * r0 / 2.0).abs() < 1e-12);
}

#[test]
fn test_risk_decreases_with_distance_and_vanishes_beyond_range() {
    let predictor = SpreadPredictor::default();
    let profile = DiseaseRegistry::global().profile("measles");
    // base risk 1, so the cap of 10 never flattens the curve
    let outbreak = equator_outbreak("measles", 0.0, 10, 2.5);
    let outbreaks = [outbreak];

    let degrees_per_km = 1.0 / km_per_degree_equator();
    let mut previous = f64::INFINITY;
    for km in [0.0, 1.0, 5.0, 10.0, 25.0, 40.0, 59.0] {
        let risk = predictor.risk_at(&outbreaks, 0.0, km * degrees_per_km);
        assert!(risk > 0.0, "no risk at {km} km");
        assert!(risk < previous, "risk did not decrease at {km} km");
        previous = risk;
    }

    for km in [profile.max_range_km + 0.5, 75.0, 500.0] {
        assert_eq!(predictor.risk_at(&outbreaks, 0.0, km * degrees_per_km), 0.0);
    }
}

#[test]
fn test_midpoint_between_distant_outbreaks_has_no_risk() {
    let predictor = SpreadPredictor::default();
    let range = DiseaseRegistry::global().profile("covid-19").max_range_km;
    assert_eq!(range, 100.0);

    // 200 km apart along the equator
    let offset = range / km_per_degree_equator();
    let outbreaks = [
        equator_outbreak("covid-19", -offset, 500, 4.0),
        equator_outbreak("covid-19", offset, 500, 4.0),
    ];
    let to_midpoint = haversine_distance_km(0.0, -offset, 0.0, 0.0);
    assert!((to_midpoint - 100.0).abs() < 1e-6);
    assert!((haversine_distance_km(0.0, -offset, 0.0, offset) - 200.0).abs() < 1e-6);

    assert_eq!(predictor.contribution(&outbreaks[0], 0.0, 0.0), 0.0);
    assert_eq!(predictor.contribution(&outbreaks[1], 0.0, 0.0), 0.0);
    assert_eq!(predictor.risk_at(&outbreaks, 0.0, 0.0), 0.0);
    assert!(predictor.assess_location(&outbreaks, 0.0, 0.0).is_none());

    // Close to either outbreak the risk is substantial
    assert!(predictor.risk_at(&outbreaks, 0.0, -offset + 0.05) > 7.0);
}

#[test]
fn test_predict_ranks_and_buckets() {
    let outbreaks = [
        OutbreakFixture::new(0.0, 0.0, 800, 4.0),
        OutbreakFixture::new(0.3, 0.4, 150, 3.0),
    ]
    .map(OutbreakFixture::build);
    let bounds = GeoBounds::new(-0.8, 0.8, -0.8, 0.8);
    let prediction = predict_spread(&outbreaks, &bounds);

    let config = SpreadConfig::default();
    assert!(prediction.high_risk.len() <= config.high_risk_limit);
    assert!(prediction.medium_risk.len() <= config.medium_risk_limit);
    assert!(prediction.low_risk.len() <= config.low_risk_limit);
    assert!(!prediction.high_risk.is_empty());
    assert_eq!(prediction.outbreaks_considered, 2);

    for (bucket, level, range) in [
        (&prediction.high_risk, RiskLevel::High, 7.0..=10.0),
        (&prediction.medium_risk, RiskLevel::Medium, 5.0..=7.0),
        (&prediction.low_risk, RiskLevel::Low, 4.0..=5.0),
    ] {
        assert!(bucket.windows(2).all(|w| w[0].risk_score >= w[1].risk_score));
        for area in bucket {
            assert_eq!(area.risk_level, level);
            assert!(range.contains(&area.risk_score));
            assert!((area.spread_probability - area.risk_score / 10.0).abs() < 1e-12);
            assert!(area.distance_to_source_km >= config.exclusion_radius_km);
            assert!(area.estimated_days_to_onset >= config.onset_offset_days);
            assert!(bounds.contains(area.latitude, area.longitude));
        }
    }

    assert!(!prediction.heatmap.is_empty());
    for cell in &prediction.heatmap {
        assert!(cell.risk > config.heatmap_min_risk && cell.risk <= 10.0);
    }
}

#[test]
fn test_no_outbreaks_means_empty_prediction() {
    let prediction = predict_spread(&[], &GeoBounds::new(10.0, 11.0, 20.0, 21.0));
    assert_eq!(prediction.ranked_area_count(), 0);
    assert!(prediction.heatmap.is_empty());
}

struct OutbreakFixture {
    latitude: f64,
    longitude: f64,
    cases: u64,
    severity: f64,
}

impl OutbreakFixture {
    const fn new(latitude: f64, longitude: f64, cases: u64, severity: f64) -> Self {
        Self {
            latitude,
            longitude,
            cases,
            severity,
        }
    }

    fn build(self) -> epi_forecast::OutbreakLocation {
        epi_forecast::OutbreakLocation::new(self.latitude, self.longitude, self.cases, "covid-19", self.severity)
    }
}
