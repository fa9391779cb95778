use crate::common::{GeoPoint, Vec2D};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use strum_macros::Display;

/// A single Monte Carlo landing candidate.
pub type DispersionPoint = GeoPoint;

/// Default number of draws per ensemble.
pub const DEFAULT_ENSEMBLE_COUNT: usize = 200;
/// Default dispersion radius in meters, three standard deviations of the offset.
pub const DEFAULT_RADIUS_M: f64 = 500.0;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DispersionError {
    InvalidRadius,
    InvalidCenter,
    NotEnoughSamples,
}

impl std::error::Error for DispersionError {}

/// Draws `count` landing candidates around `center`.
///
/// Each candidate is an isotropic Gaussian east/north offset with a standard
/// deviation of `radius_m / 3`, converted to degrees with the flat-earth factors at
/// the center latitude. Draws are independent, their order carries no meaning.
///
/// # Arguments
/// - `center`: The nominal landing coordinate.
/// - `count`: Number of draws, `0` yields an empty ensemble.
/// - `radius_m`: Dispersion radius in meters, roughly the 3σ bound.
/// - `rng`: Random source, pass a seeded generator for reproducible ensembles.
///
/// # Returns
/// - `Ok(points)` in generation order.
/// - `Err(DispersionError)` for a negative or non-finite radius or a non-finite center.
pub fn generate_ensemble<R: Rng + ?Sized>(
    center: GeoPoint,
    count: usize,
    radius_m: f64,
    rng: &mut R,
) -> Result<Vec<DispersionPoint>, DispersionError> {
    if !center.is_finite() {
        return Err(DispersionError::InvalidCenter);
    }
    if !radius_m.is_finite() || radius_m < 0.0 {
        return Err(DispersionError::InvalidRadius);
    }
    let offset = Normal::new(0.0, radius_m / 3.0).map_err(|_| DispersionError::InvalidRadius)?;
    Ok((0..count)
        .map(|_| {
            let north = offset.sample(rng);
            let east = offset.sample(rng);
            center.offset_by_meters(Vec2D::new(east, north))
        })
        .collect())
}
