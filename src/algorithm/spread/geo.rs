//! Great-circle geometry helpers

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude
pub const KM_PER_DEGREE_LAT: f64 = 111.0;

/// Haversine distance in kilometres between two latitude/longitude pairs
#[must_use]
pub fn haversine_distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Kilometres per degree of longitude at the given latitude
#[must_use]
pub fn km_per_degree_lng(latitude: f64) -> f64 {
    KM_PER_DEGREE_LAT * latitude.to_radians().cos().abs()
}

/// `count` evenly spaced samples from `min` to `max` inclusive
///
/// A single sample sits at `min`; a degenerate range repeats nothing.
#[must_use]
pub fn axis_samples(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ if max <= min => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { max } else { min + step * i as f64 })
                .collect()
        }
    }
}

/// Number of samples needed to cover `span_km` at `resolution_km`, capped
#[must_use]
pub fn samples_for_span(span_km: f64, resolution_km: f64, cap: usize) -> usize {
    if !(span_km > 0.0) || !(resolution_km > 0.0) {
        return 1;
    }
    let needed = (span_km / resolution_km).ceil() + 1.0;
    if needed >= cap as f64 { cap.max(1) } else { needed as usize }
}
