//! Great-circle helpers shared by the router and polyline utilities.
use eld_core::Location;

pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance between two coordinate pairs, in miles.
pub fn haversine(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);
    EARTH_RADIUS_MILES * 2.0 * a.sqrt().asin()
}

pub fn haversine_miles(a: &Location, b: &Location) -> f64 {
    haversine(a.latitude, a.longitude, b.latitude, b.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        assert_eq!(haversine(40.0, -75.0, 40.0, -75.0), 0.0);
    }

    #[test]
    fn test_nyc_to_la_great_circle() {
        // Known great-circle distance is roughly 2445 miles.
        let miles = haversine(40.7128, -74.0060, 34.0522, -118.2437);
        assert!((2430.0..2460.0).contains(&miles), "got {miles}");
    }

    #[test]
    fn test_symmetry() {
        let ab = haversine(40.7128, -74.0060, 41.8781, -87.6298);
        let ba = haversine(41.8781, -87.6298, 40.7128, -74.0060);
        assert!((ab - ba).abs() < 1e-9);
    }
}
