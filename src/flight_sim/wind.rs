use super::sim_config::WindConfig;
use crate::common::Vec2D;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Deterministic wind oscillation with independent Gaussian jitter per sample.
///
/// The jitter is not a persisted process, two consecutive samples only share the
/// smooth part.
#[derive(Debug, Clone)]
pub struct WindModel {
    config: WindConfig,
    noise: Option<Normal<f64>>,
}

impl WindModel {
    /// Creates a new wind model.
    ///
    /// A `noise_std` that is zero, negative or not finite disables the jitter.
    pub fn new(config: WindConfig) -> Self {
        let noise = (config.noise_std.is_finite() && config.noise_std > 0.0)
            .then(|| Normal::new(0.0, config.noise_std).ok())
            .flatten();
        Self { config, noise }
    }

    /// The smooth part of the wind at mission time `t`, in m/s (east, north).
    pub fn mean_at(&self, t: f64) -> Vec2D<f64> {
        let c = &self.config;
        Vec2D::new(
            c.east_mean + c.east_amplitude * (c.east_frequency * t).sin(),
            c.north_mean + c.north_amplitude * (c.north_frequency * t).cos(),
        )
    }

    /// Samples the instantaneous wind at mission time `t`.
    pub fn sample<R: Rng + ?Sized>(&self, t: f64, rng: &mut R) -> Vec2D<f64> {
        let mean = self.mean_at(t);
        match &self.noise {
            Some(noise) => mean + Vec2D::new(noise.sample(rng), noise.sample(rng)),
            None => mean,
        }
    }
}
