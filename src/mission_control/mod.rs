#[allow(clippy::module_inception)]
mod mission_control;

pub use mission_control::{MissionControl, MissionEvent};
