use crate::common::GeoPoint;
use crate::dispersion::{
    CepMode, DEFAULT_ENSEMBLE_COUNT, DEFAULT_RADIUS_M, DispersionError, LandingForecast,
};
use crate::flight_sim::{Phase, TelemetrySample};
use rand::Rng;

/// Noteworthy changes derived from the telemetry stream.
#[derive(Debug, Clone, PartialEq)]
pub enum MissionEvent {
    PhaseChanged { from: Phase, to: Phase },
    /// The landing forecast was generated, see [`MissionControl::forecast`].
    ForecastReady,
    ForecastFailed(DispersionError),
    Landed { position: GeoPoint, mission_time: f64 },
}

/// Consumer side view of a mission.
///
/// Tracks the phase sequence of the incoming frames and requests the landing
/// forecast exactly once, on the first `DESCENT` frame.
pub struct MissionControl<R> {
    rng: R,
    cep_mode: CepMode,
    ensemble_count: usize,
    radius_m: f64,
    last_phase: Phase,
    latest: Option<TelemetrySample>,
    forecast: Option<LandingForecast>,
    forecast_requested: bool,
}

impl<R: Rng> MissionControl<R> {
    pub fn new(cep_mode: CepMode, rng: R) -> Self {
        Self {
            rng,
            cep_mode,
            ensemble_count: DEFAULT_ENSEMBLE_COUNT,
            radius_m: DEFAULT_RADIUS_M,
            last_phase: Phase::Prelaunch,
            latest: None,
            forecast: None,
            forecast_requested: false,
        }
    }

    /// Overrides the ensemble size and radius used for the landing forecast.
    #[must_use]
    pub fn with_ensemble(mut self, count: usize, radius_m: f64) -> Self {
        self.ensemble_count = count;
        self.radius_m = radius_m;
        self
    }

    pub fn last_phase(&self) -> Phase { self.last_phase }

    pub fn latest(&self) -> Option<&TelemetrySample> { self.latest.as_ref() }

    pub fn forecast(&self) -> Option<&LandingForecast> { self.forecast.as_ref() }

    /// Processes one telemetry frame.
    ///
    /// A frame older than the previous one marks a restarted mission and clears the
    /// phase history and forecast.
    ///
    /// # Returns
    /// The events triggered by this frame, in the order they happened.
    pub fn observe(&mut self, sample: &TelemetrySample) -> Vec<MissionEvent> {
        if self.latest.is_some_and(|prev| sample.mission_time() < prev.mission_time()) {
            self.last_phase = Phase::Prelaunch;
            self.forecast = None;
            self.forecast_requested = false;
        }
        self.latest = Some(*sample);

        let mut events = Vec::new();
        let phase = sample.phase();
        if phase != self.last_phase {
            events.push(MissionEvent::PhaseChanged { from: self.last_phase, to: phase });
            self.last_phase = phase;
        }

        if phase == Phase::Descent && !self.forecast_requested {
            self.forecast_requested = true;
            match LandingForecast::generate(
                sample.position(),
                self.ensemble_count,
                self.radius_m,
                self.cep_mode,
                &mut self.rng,
            ) {
                Ok(forecast) => {
                    self.forecast = Some(forecast);
                    events.push(MissionEvent::ForecastReady);
                }
                Err(e) => events.push(MissionEvent::ForecastFailed(e)),
            }
        }

        if phase == Phase::Landed {
            events.push(MissionEvent::Landed {
                position: sample.position(),
                mission_time: sample.mission_time(),
            });
        }
        events
    }
}
