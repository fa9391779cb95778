use crate::common::GeoPoint;
use std::time::Duration;

/// Lower bound of the operator speed multiplier.
pub const MIN_SPEED_MULTIPLIER: f64 = 1.0;
/// Upper bound of the operator speed multiplier.
pub const MAX_SPEED_MULTIPLIER: f64 = 20.0;

/// Clamps an operator speed multiplier into `[MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER]`.
///
/// # Returns
/// - `Some(clamped)` for finite inputs.
/// - `None` for `NaN` or infinite values, which callers ignore.
pub fn clamp_speed_multiplier(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER))
}

/// Parameters of the synthetic wind field.
///
/// Each component follows `mean + amplitude * trig(frequency * t)` with independent
/// zero-mean Gaussian jitter of `noise_std` added on every sample. East uses `sin`,
/// north uses `cos`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindConfig {
    pub east_mean: f64,
    pub east_amplitude: f64,
    pub east_frequency: f64,
    pub north_mean: f64,
    pub north_amplitude: f64,
    pub north_frequency: f64,
    pub noise_std: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            east_mean: 3.0,
            east_amplitude: 2.0,
            east_frequency: 0.05,
            north_mean: -1.0,
            north_amplitude: 1.5,
            north_frequency: 0.03,
            noise_std: 0.5,
        }
    }
}

/// Mission constants of the flight simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Launch coordinate, drift is accumulated relative to it.
    pub launch_site: GeoPoint,
    /// Altitude floor in meters, also the launch altitude.
    pub ground_altitude: f64,
    /// Altitude above which `LAUNCH` hands over to `ASCENT`.
    pub ascent_altitude: f64,
    pub burst_altitude: f64,
    /// Simulated seconds per tick at a speed multiplier of 1.
    pub base_step: f64,
    /// Wall clock cadence of the tick loop, independent of the speed multiplier.
    pub tick_interval: Duration,
    /// Horizontal drift coupling while ascending.
    pub ascent_drift_coupling: f64,
    /// Horizontal drift coupling while descending under canopy.
    pub descent_drift_coupling: f64,
    pub wind: WindConfig,
    /// Seed for the wind jitter. `None` draws fresh entropy on every start.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            launch_site: GeoPoint::new(12.2253, 79.0747),
            ground_altitude: 5.0,
            ascent_altitude: 500.0,
            burst_altitude: 35_000.0,
            base_step: 0.2,
            tick_interval: Duration::from_millis(200),
            ascent_drift_coupling: 0.3,
            descent_drift_coupling: 0.8,
            wind: WindConfig::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Returns a copy of the config with a fixed wind seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
