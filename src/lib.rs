#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
//! Flight simulator and landing dispersion model of a high-altitude balloon mission.
//!
//! [`flight_sim::FlightSimulator`] advances the balloon through its mission phases on
//! a fixed wall clock cadence and pushes one [`flight_sim::TelemetrySample`] per tick
//! to its subscriber. [`dispersion::LandingForecast`] turns a coordinate into a Monte
//! Carlo cloud of landing candidates with a CEP ellipse.
pub mod common;
pub mod dispersion;
pub mod flight_sim;
pub mod logger;
pub mod mission_control;
