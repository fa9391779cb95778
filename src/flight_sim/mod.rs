mod flight_model;
mod phase;
mod sim_config;
mod simulator;
mod telemetry;
mod wind;
#[cfg(test)]
mod tests;

pub use flight_model::{FlightModel, SimulatorState};
pub use phase::Phase;
pub use sim_config::{
    MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER, SimConfig, WindConfig, clamp_speed_multiplier,
};
pub use simulator::{FlightSimulator, TelemetrySink, channel_sink};
pub use telemetry::TelemetrySample;
pub use wind::WindModel;
