//! Great-circle distance kernel
//!
//! Haversine distance on a spherical Earth of fixed radius. The kernel is a
//! pure function of its inputs and is the only computation workers perform.

use crate::points::Point;
use std::f64::consts::PI;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Coordinates of both endpoints of one pair, as shipped to a worker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePair {
    pub lat1: f64,
    pub lat2: f64,
    pub lon1: f64,
    pub lon2: f64,
}

impl CoordinatePair {
    pub fn new(a: &Point, b: &Point) -> Self {
        Self {
            lat1: a.latitude,
            lat2: b.latitude,
            lon1: a.longitude,
            lon2: b.longitude,
        }
    }

    /// The same pair with endpoints swapped
    pub fn reversed(&self) -> Self {
        Self {
            lat1: self.lat2,
            lat2: self.lat1,
            lon1: self.lon2,
            lon2: self.lon1,
        }
    }
}

/// Pure: haversine distance in kilometers between two points in degrees
///
/// `a` is clamped into `[0, 1]` so rounding near identical or antipodal
/// points can never reach `sqrt` of a negative number.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_km: f64) -> f64 {
    let phi1 = lat1 / 180.0 * PI;
    let phi2 = lat2 / 180.0 * PI;

    let d_phi = phi2 - phi1;
    let d_lambda = (lon1 - lon2) / 180.0 * PI;

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    radius_km * c
}

/// Distance function applied by workers to every pair of their chunk
pub trait DistanceKernel: Send + Sync + 'static {
    fn distance(&self, pair: &CoordinatePair) -> f64;
}

/// Haversine kernel with a configurable sphere radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Haversine {
    pub radius_km: f64,
}

impl Haversine {
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }
}

impl Default for Haversine {
    fn default() -> Self {
        Self::new(EARTH_RADIUS_KM)
    }
}

impl DistanceKernel for Haversine {
    fn distance(&self, pair: &CoordinatePair) -> f64 {
        haversine_km(pair.lat1, pair.lon1, pair.lat2, pair.lon2, self.radius_km)
    }
}

impl<F> DistanceKernel for F
where
    F: Fn(&CoordinatePair) -> f64 + Send + Sync + 'static,
{
    fn distance(&self, pair: &CoordinatePair) -> f64 {
        (self)(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> Point {
        Point::new("London", 51.5074, -0.1278)
    }

    fn new_york() -> Point {
        Point::new("New York", 40.7128, -74.0060)
    }

    #[test]
    fn test_london_new_york() {
        let d = Haversine::default().distance(&CoordinatePair::new(&london(), &new_york()));
        assert!((d - 5570.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn test_identity_is_exactly_zero() {
        let p = london();
        let d = haversine_km(
            p.latitude,
            p.longitude,
            p.latitude,
            p.longitude,
            EARTH_RADIUS_KM,
        );
        assert_eq!(d, 0.0);
        assert_eq!(haversine_km(-90.0, 0.0, -90.0, 0.0, EARTH_RADIUS_KM), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let kernel = Haversine::default();
        let pair = CoordinatePair::new(&london(), &new_york());
        let forward = kernel.distance(&pair);
        let backward = kernel.distance(&pair.reversed());
        assert!((forward - backward).abs() <= 1e-9 * forward);
    }

    #[test]
    fn test_antipodal_points_bounded_by_half_circumference() {
        let max = PI * EARTH_RADIUS_KM;
        let d = haversine_km(0.0, 0.0, 0.0, 180.0, EARTH_RADIUS_KM);
        assert!((d - max).abs() < 1e-6);

        let d = haversine_km(90.0, 0.0, -90.0, 0.0, EARTH_RADIUS_KM);
        assert!(d.is_finite());
        assert!(d <= max + 1e-9);

        let d = haversine_km(45.0, 30.0, -45.0, -150.0, EARTH_RADIUS_KM);
        assert!(!d.is_nan());
        assert!((d - max).abs() < 1e-6);
    }

    #[test]
    fn test_radius_scales_linearly() {
        let unit = haversine_km(10.0, 20.0, -30.0, 40.0, 1.0);
        let earth = haversine_km(10.0, 20.0, -30.0, 40.0, EARTH_RADIUS_KM);
        assert!((earth - unit * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_closure_kernel() {
        let kernel = |pair: &CoordinatePair| pair.lat1 + pair.lat2;
        let pair = CoordinatePair::new(&london(), &new_york());
        assert_eq!(kernel.distance(&pair), 51.5074 + 40.7128);
    }
}
