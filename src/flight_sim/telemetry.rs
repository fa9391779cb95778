use super::phase::Phase;
use crate::common::{GeoPoint, Vec2D};
use serde::{Deserialize, Serialize};

/// One telemetry frame, emitted once per simulator tick.
///
/// The serialized field names match the JSON frames of the ground station feed, so a
/// live data link can stand in for the simulator without touching consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Simulated seconds since mission start.
    #[serde(rename = "time")]
    mission_time: f64,
    #[serde(rename = "lat")]
    latitude: f64,
    #[serde(rename = "lon")]
    longitude: f64,
    /// Meters above the ground reference, never below the ground floor.
    #[serde(rename = "alt")]
    altitude: f64,
    /// Positive while ascending, in m/s.
    #[serde(rename = "verticalSpeed")]
    vertical_speed: f64,
    wind_east: f64,
    wind_north: f64,
    phase: Phase,
}

impl TelemetrySample {
    pub fn new(
        mission_time: f64,
        position: GeoPoint,
        altitude: f64,
        vertical_speed: f64,
        wind: Vec2D<f64>,
        phase: Phase,
    ) -> Self {
        Self {
            mission_time,
            latitude: position.lat(),
            longitude: position.lon(),
            altitude,
            vertical_speed,
            wind_east: wind.x(),
            wind_north: wind.y(),
            phase,
        }
    }

    pub fn mission_time(&self) -> f64 { self.mission_time }
    pub fn latitude(&self) -> f64 { self.latitude }
    pub fn longitude(&self) -> f64 { self.longitude }
    pub fn position(&self) -> GeoPoint { GeoPoint::new(self.latitude, self.longitude) }
    pub fn altitude(&self) -> f64 { self.altitude }
    pub fn vertical_speed(&self) -> f64 { self.vertical_speed }
    pub fn wind_east(&self) -> f64 { self.wind_east }
    pub fn wind_north(&self) -> f64 { self.wind_north }
    pub fn wind(&self) -> Vec2D<f64> { Vec2D::new(self.wind_east, self.wind_north) }
    pub fn phase(&self) -> Phase { self.phase }

    /// Horizontal wind speed in m/s.
    pub fn wind_speed(&self) -> f64 { self.wind().abs() }

    /// Compass bearing the wind blows toward, in degrees `[0, 360)`.
    pub fn wind_heading_deg(&self) -> f64 { self.wind().bearing_deg() }

    /// Altitude as a fraction of `burst_altitude`, clamped to `[0, 1]`.
    pub fn altitude_fraction(&self, burst_altitude: f64) -> f64 {
        if burst_altitude <= 0.0 {
            return 1.0;
        }
        (self.altitude / burst_altitude).clamp(0.0, 1.0)
    }

    /// Mission elapsed time formatted as `T+MM:SS`.
    ///
    /// Minutes are not wrapped into hours, a four hour flight reads `T+240:00`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn mission_elapsed_label(&self) -> String {
        let total = self.mission_time.max(0.0).floor() as u64;
        format!("T+{:02}:{:02}", total / 60, total % 60)
    }
}
