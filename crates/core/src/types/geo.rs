//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point without range checking.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether the latitude is a finite value within [-90, 90].
    #[must_use]
    pub fn lat_in_range(&self) -> bool {
        self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat)
    }

    /// Whether the longitude is a finite value within [-180, 180].
    #[must_use]
    pub fn lng_in_range(&self) -> bool {
        self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Wire form of a location where either coordinate may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPointRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_checks() {
        assert!(GeoPoint::new(42.3601, -71.0589).lat_in_range());
        assert!(!GeoPoint::new(91.0, 0.0).lat_in_range());
        assert!(!GeoPoint::new(0.0, -180.5).lng_in_range());
        assert!(!GeoPoint::new(f64::NAN, 0.0).lat_in_range());
    }
}
