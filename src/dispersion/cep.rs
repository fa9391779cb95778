use super::ensemble::{DispersionError, DispersionPoint};
use crate::common::{GeoPoint, Vec2D};
use serde::{Deserialize, Serialize};

/// Elliptical error probable around a predicted landing point.
///
/// The orientation is the compass bearing of the semi-major axis in `[0, 180)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CepEllipse {
    center: GeoPoint,
    semi_major_m: f64,
    semi_minor_m: f64,
    orientation_deg: f64,
}

impl CepEllipse {
    pub const FIXED_SEMI_MAJOR_M: f64 = 500.0;
    pub const FIXED_SEMI_MINOR_M: f64 = 350.0;
    /// Ratio of the 50 % containment radius to σ for a bivariate normal, `sqrt(2 ln 2)`.
    const HALF_CONTAINMENT_SCALE: f64 = 1.177_410_022_515_474_7;

    /// Fixed-axis ellipse (500 m by 350 m, major axis north) independent of any ensemble.
    pub fn fixed(center: GeoPoint) -> Self {
        Self {
            center,
            semi_major_m: Self::FIXED_SEMI_MAJOR_M,
            semi_minor_m: Self::FIXED_SEMI_MINOR_M,
            orientation_deg: 0.0,
        }
    }

    /// Fits the 50 % containment ellipse to the empirical covariance of `points`.
    ///
    /// Offsets are measured in meters around `center`, the covariance is taken about
    /// the sample mean. The ellipse stays centered at `center`.
    ///
    /// # Returns
    /// - `Err(DispersionError::NotEnoughSamples)` for fewer than two points.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_ensemble(
        center: GeoPoint,
        points: &[DispersionPoint],
    ) -> Result<Self, DispersionError> {
        if !center.is_finite() {
            return Err(DispersionError::InvalidCenter);
        }
        if points.len() < 2 {
            return Err(DispersionError::NotEnoughSamples);
        }
        let offsets = points.iter().map(|p| center.meters_to(p)).collect::<Vec<_>>();
        let n = offsets.len() as f64;
        let mean = offsets.iter().fold(Vec2D::zero(), |acc, o| acc + *o) * (1.0 / n);

        let (mut s_ee, mut s_nn, mut s_en) = (0.0, 0.0, 0.0);
        for o in &offsets {
            let d = *o - mean;
            s_ee += d.x() * d.x();
            s_nn += d.y() * d.y();
            s_en += d.x() * d.y();
        }
        s_ee /= n - 1.0;
        s_nn /= n - 1.0;
        s_en /= n - 1.0;

        let half_trace = (s_ee + s_nn) / 2.0;
        let spread = ((s_ee - s_nn).powi(2) / 4.0 + s_en.powi(2)).sqrt();
        let major_var = half_trace + spread;
        let minor_var = (half_trace - spread).max(0.0);

        let major_axis = if s_en.abs() > f64::EPSILON {
            Vec2D::new(s_en, major_var - s_ee)
        } else if s_ee >= s_nn {
            Vec2D::new(1.0, 0.0)
        } else {
            Vec2D::new(0.0, 1.0)
        };

        Ok(Self {
            center,
            semi_major_m: Self::HALF_CONTAINMENT_SCALE * major_var.sqrt(),
            semi_minor_m: Self::HALF_CONTAINMENT_SCALE * minor_var.sqrt(),
            orientation_deg: major_axis.bearing_deg() % 180.0,
        })
    }

    pub fn center(&self) -> GeoPoint { self.center }
    pub fn semi_major_m(&self) -> f64 { self.semi_major_m }
    pub fn semi_minor_m(&self) -> f64 { self.semi_minor_m }
    pub fn orientation_deg(&self) -> f64 { self.orientation_deg }

    /// Area of the ellipse in square meters.
    pub fn area_m2(&self) -> f64 { std::f64::consts::PI * self.semi_major_m * self.semi_minor_m }

    /// Checks whether `point` lies inside or on the ellipse.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        if self.semi_major_m <= 0.0 || self.semi_minor_m <= 0.0 {
            return false;
        }
        let offset = self.center.meters_to(point);
        let (sin, cos) = self.orientation_deg.to_radians().sin_cos();
        let along = offset.x() * sin + offset.y() * cos;
        let across = offset.x() * cos - offset.y() * sin;
        (along / self.semi_major_m).powi(2) + (across / self.semi_minor_m).powi(2) <= 1.0
    }
}
