use super::vec2d::Vec2D;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Length of one degree of latitude in meters (flat-earth approximation).
pub const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Length of one degree of longitude in meters at the given latitude.
///
/// Only valid close to the reference latitude, drift over hundreds of kilometers
/// is not corrected for.
///
/// # Arguments
/// * `lat_deg` - The reference latitude in degrees.
pub fn meters_per_deg_lon(lat_deg: f64) -> f64 { METERS_PER_DEG_LAT * lat_deg.to_radians().cos() }

/// A geographic coordinate in degrees (WGS84-style latitude and longitude).
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self { Self { lat, lon } }

    pub const fn lat(&self) -> f64 { self.lat }

    pub const fn lon(&self) -> f64 { self.lon }

    pub fn is_finite(&self) -> bool { self.lat.is_finite() && self.lon.is_finite() }

    /// Shifts the point by a metric east/north offset.
    ///
    /// The meters-per-degree factors are evaluated at the latitude of `self`.
    ///
    /// # Arguments
    /// * `offset` - Offset in meters, `x` pointing east and `y` pointing north.
    ///
    /// # Returns
    /// The displaced `GeoPoint`.
    pub fn offset_by_meters(&self, offset: Vec2D<f64>) -> Self {
        Self::new(
            self.lat + offset.y() / METERS_PER_DEG_LAT,
            self.lon + offset.x() / meters_per_deg_lon(self.lat),
        )
    }

    /// Computes the metric east/north offset from `self` to `other`.
    ///
    /// Inverse of [`GeoPoint::offset_by_meters`] when evaluated around `self`.
    pub fn meters_to(&self, other: &GeoPoint) -> Vec2D<f64> {
        Vec2D::new(
            (other.lon - self.lon) * meters_per_deg_lon(self.lat),
            (other.lat - self.lat) * METERS_PER_DEG_LAT,
        )
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}°, {:.6}°)", self.lat, self.lon)
    }
}
