//! # Geo Module
//!
//! Coordinates and the "nearby store" check.
//!
//! Coordinates live on a flat `[0, 100] x [0, 100]` grid and distance is plain
//! Euclidean distance, reported in miles by convention. No great-circle math.
//!
//! ```text
//!   lon
//!    ▲
//!    │        ● store (13, 14)
//!    │       ╱
//!    │      ╱  d = sqrt(3² + 4²) = 5
//!    │     ╱
//!    │    ● user (10, 10)
//!    └──────────────────────► lat
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::validate_coordinate;

/// Radius used by "View Stores within 30 miles" and by order placement.
pub const NEARBY_RADIUS_MILES: f64 = 30.0;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    /// Builds a point after checking both coordinates are on the grid.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        validate_coordinate("latitude", latitude)?;
        validate_coordinate("longitude", longitude)?;
        Ok(GeoPoint::new(latitude, longitude))
    }

    /// Euclidean distance between two points.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance(self, other)
    }

    /// True when `other` is at most `radius` away. The boundary is inclusive.
    pub fn is_within(&self, other: &GeoPoint, radius: f64) -> bool {
        self.distance_to(other) <= radius
    }
}

/// Euclidean distance between two latitude/longitude pairs.
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = a.latitude - b.latitude;
    let d_lon = a.longitude - b.longitude;
    (d_lat * d_lat + d_lon * d_lon).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let a = GeoPoint::new(10.0, 10.0);
        let b = GeoPoint::new(13.0, 14.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        let user = GeoPoint::new(0.0, 0.0);
        let edge = GeoPoint::new(18.0, 24.0); // exactly 30
        let outside = GeoPoint::new(18.0, 24.1);

        assert!(user.is_within(&edge, NEARBY_RADIUS_MILES));
        assert!(!user.is_within(&outside, NEARBY_RADIUS_MILES));
    }

    #[test]
    fn test_checked_rejects_off_grid() {
        assert!(GeoPoint::checked(50.0, 50.0).is_ok());
        assert!(GeoPoint::checked(-1.0, 50.0).is_err());
        assert!(GeoPoint::checked(50.0, 100.5).is_err());
        assert!(GeoPoint::checked(f64::NAN, 1.0).is_err());
    }
}
