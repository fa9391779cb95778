use super::{
    phase::Phase,
    sim_config::{MIN_SPEED_MULTIPLIER, SimConfig, clamp_speed_multiplier},
    telemetry::TelemetrySample,
    wind::WindModel,
};
use crate::common::{
    GeoPoint, Vec2D,
    geo::{METERS_PER_DEG_LAT, meters_per_deg_lon},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Kinematic state of the balloon, mutated once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorState {
    phase: Phase,
    mission_time: f64,
    altitude: f64,
    vertical_speed: f64,
    /// Accumulated latitude drift in degrees relative to the launch site.
    drift_lat: f64,
    /// Accumulated longitude drift in degrees relative to the launch site.
    drift_lon: f64,
    speed_multiplier: f64,
    running: bool,
}

impl SimulatorState {
    fn prelaunch(config: &SimConfig, speed_multiplier: f64) -> Self {
        Self {
            phase: Phase::Prelaunch,
            mission_time: 0.0,
            altitude: config.ground_altitude,
            vertical_speed: 0.0,
            drift_lat: 0.0,
            drift_lon: 0.0,
            speed_multiplier,
            running: false,
        }
    }

    pub fn phase(&self) -> Phase { self.phase }
    pub fn mission_time(&self) -> f64 { self.mission_time }
    pub fn altitude(&self) -> f64 { self.altitude }
    pub fn vertical_speed(&self) -> f64 { self.vertical_speed }
    pub fn drift(&self) -> (f64, f64) { (self.drift_lat, self.drift_lon) }
    pub fn speed_multiplier(&self) -> f64 { self.speed_multiplier }
    pub fn is_running(&self) -> bool { self.running }

    /// Current position given the launch coordinate the drift is relative to.
    pub fn position(&self, launch_site: GeoPoint) -> GeoPoint {
        GeoPoint::new(
            launch_site.lat() + self.drift_lat,
            launch_site.lon() + self.drift_lon,
        )
    }
}

/// Synchronous flight physics of a single balloon.
///
/// The model holds no timer, [`FlightModel::tick`] advances the state by exactly one
/// step and returns the frame to emit. Wall clock scheduling is left to
/// [`super::FlightSimulator`].
#[derive(Debug)]
pub struct FlightModel<R> {
    config: SimConfig,
    wind: WindModel,
    state: SimulatorState,
    rng: R,
}

impl FlightModel<StdRng> {
    /// Creates a model whose wind jitter is seeded from `config.seed`, or from
    /// operating system entropy if no seed is set.
    pub fn from_config(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(config, rng)
    }
}

impl<R: Rng> FlightModel<R> {
    /// Climb rate during `LAUNCH` before the multiplier is applied.
    const LAUNCH_CLIMB_RATE: f64 = 5.0;
    const ASCENT_BASE_RATE: f64 = 5.0;
    /// Upper bound of the altitude dependent ascent gain.
    const ASCENT_GAIN_CAP: f64 = 8.0;
    /// Meters of altitude per unit of ascent gain.
    const ASCENT_GAIN_SCALE: f64 = 5_000.0;
    const DESCENT_BASE_RATE: f64 = 3.0;
    /// Upper bound of the descent gain, driven by the distance below burst altitude.
    const DESCENT_GAIN_CAP: f64 = 5.0;
    const DESCENT_GAIN_SCALE: f64 = 3_000.0;

    /// Creates a new model in `PRELAUNCH` with a speed multiplier of 1.
    pub fn new(config: SimConfig, rng: R) -> Self {
        let state = SimulatorState::prelaunch(&config, MIN_SPEED_MULTIPLIER);
        let wind = WindModel::new(config.wind);
        Self { config, wind, state, rng }
    }

    pub fn config(&self) -> &SimConfig { &self.config }

    pub fn state(&self) -> &SimulatorState { &self.state }

    pub fn position(&self) -> GeoPoint { self.state.position(self.config.launch_site) }

    /// Stores a clamped speed multiplier, used from the next tick on.
    ///
    /// # Returns
    /// The effective multiplier. Non-finite inputs leave the previous value in place.
    pub fn set_speed_multiplier(&mut self, value: f64) -> f64 {
        if let Some(clamped) = clamp_speed_multiplier(value) {
            self.state.speed_multiplier = clamped;
        }
        self.state.speed_multiplier
    }

    /// Resets the state to mission start and enters `LAUNCH`.
    ///
    /// Progress of a previous flight is discarded, the speed multiplier is kept.
    pub fn launch(&mut self) {
        self.state = SimulatorState::prelaunch(&self.config, self.state.speed_multiplier);
        self.state.phase = Phase::Launch;
        self.state.running = true;
    }

    /// Freezes the state, later ticks emit nothing until the next launch.
    pub fn halt(&mut self) { self.state.running = false; }

    /// Advances the flight by one step.
    ///
    /// # Returns
    /// - `Some(sample)` built from the post-update state.
    /// - `None` if the model is halted, not launched yet or already landed.
    pub fn tick(&mut self) -> Option<TelemetrySample> {
        if !self.state.running || !self.state.phase.is_active() {
            return None;
        }
        let multiplier = self.state.speed_multiplier;
        let dt = self.config.base_step * multiplier;
        self.state.mission_time += dt;

        let wind = self.wind.sample(self.state.mission_time, &mut self.rng);
        let burst_altitude = self.config.burst_altitude;
        let ground = self.config.ground_altitude;

        match self.state.phase {
            Phase::Launch => {
                self.climb(Self::LAUNCH_CLIMB_RATE * multiplier);
                if self.state.altitude > self.config.ascent_altitude {
                    self.state.phase = Phase::Ascent;
                }
            }
            Phase::Ascent => {
                let gain = (self.state.altitude / Self::ASCENT_GAIN_SCALE).min(Self::ASCENT_GAIN_CAP);
                self.climb(Self::ASCENT_BASE_RATE + gain * multiplier);
                self.drift(wind, dt, self.config.ascent_drift_coupling);
                if self.state.altitude >= burst_altitude {
                    self.state.phase = Phase::Burst;
                }
            }
            Phase::Burst => {
                self.state.vertical_speed = 0.0;
                self.state.phase = Phase::Descent;
            }
            Phase::Descent => {
                let gain = ((burst_altitude - self.state.altitude) / Self::DESCENT_GAIN_SCALE)
                    .min(Self::DESCENT_GAIN_CAP);
                self.climb(-(Self::DESCENT_BASE_RATE + gain) * multiplier);
                self.drift(wind, dt, self.config.descent_drift_coupling);
                if self.state.altitude <= ground {
                    self.state.altitude = ground;
                    self.state.vertical_speed = 0.0;
                    self.state.phase = Phase::Landed;
                    self.state.running = false;
                }
            }
            Phase::Prelaunch | Phase::Landed => return None,
        }
        self.state.altitude = self.state.altitude.max(ground);

        Some(TelemetrySample::new(
            self.state.mission_time,
            self.position(),
            self.state.altitude,
            self.state.vertical_speed,
            wind,
            self.state.phase,
        ))
    }

    /// Sets the vertical speed and integrates altitude over one base step.
    ///
    /// The multiplier is already part of `vertical_speed`.
    fn climb(&mut self, vertical_speed: f64) {
        self.state.vertical_speed = vertical_speed;
        self.state.altitude += vertical_speed * self.config.base_step;
    }

    /// Euler step of the wind driven horizontal drift.
    fn drift(&mut self, wind: Vec2D<f64>, dt: f64, coupling: f64) {
        let lat = self.config.launch_site.lat() + self.state.drift_lat;
        let step = wind * (dt * coupling);
        self.state.drift_lat += step.y() / METERS_PER_DEG_LAT;
        self.state.drift_lon += step.x() / meters_per_deg_lon(lat);
    }
}
