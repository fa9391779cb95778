mod cep;
mod ensemble;

pub use cep::CepEllipse;
pub use ensemble::{
    DEFAULT_ENSEMBLE_COUNT, DEFAULT_RADIUS_M, DispersionError, DispersionPoint, generate_ensemble,
};

use crate::common::GeoPoint;
use rand::Rng;
use strum_macros::{Display, EnumString};

/// How the CEP ellipse of a forecast is derived.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CepMode {
    /// Fixed 500 m by 350 m axes.
    #[default]
    Fixed,
    /// Axes fitted to the covariance of the generated ensemble.
    Empirical,
}

/// Monte Carlo landing estimate: the candidate cloud plus its summary ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct LandingForecast {
    points: Vec<DispersionPoint>,
    cep: CepEllipse,
}

impl LandingForecast {
    /// Generates an ensemble around `center` and derives its CEP ellipse.
    pub fn generate<R: Rng + ?Sized>(
        center: GeoPoint,
        count: usize,
        radius_m: f64,
        mode: CepMode,
        rng: &mut R,
    ) -> Result<Self, DispersionError> {
        let points = generate_ensemble(center, count, radius_m, rng)?;
        let cep = match mode {
            CepMode::Fixed => CepEllipse::fixed(center),
            CepMode::Empirical => CepEllipse::from_ensemble(center, &points)?,
        };
        Ok(Self { points, cep })
    }

    pub fn points(&self) -> &[DispersionPoint] { &self.points }

    pub fn cep(&self) -> &CepEllipse { &self.cep }

    /// Fraction of the ensemble that falls inside the CEP ellipse.
    #[allow(clippy::cast_precision_loss)]
    pub fn containment(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let inside = self.points.iter().filter(|p| self.cep.contains(p)).count();
        inside as f64 / self.points.len() as f64
    }
}
