use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Lifecycle stage of a balloon mission.
///
/// The declaration order is the lifecycle order, so `Ord` can be used to check that
/// transitions only ever move forward.
#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    Prelaunch,
    Launch,
    Ascent,
    Burst,
    Descent,
    Landed,
}

impl Phase {
    /// Returns the phase that follows `self`, or `None` for the terminal phase.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Prelaunch => Some(Phase::Launch),
            Phase::Launch => Some(Phase::Ascent),
            Phase::Ascent => Some(Phase::Burst),
            Phase::Burst => Some(Phase::Descent),
            Phase::Descent => Some(Phase::Landed),
            Phase::Landed => None,
        }
    }

    /// Indicates whether the balloon is airborne and the tick loop advances it.
    pub fn is_active(self) -> bool { !matches!(self, Phase::Prelaunch | Phase::Landed) }

    pub fn is_terminal(self) -> bool { self == Phase::Landed }
}
