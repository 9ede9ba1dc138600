use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One step of the 4-4-6-2 box-breathing cycle, plus the resting states
/// either side of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathPhase {
    Idle,
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
    Complete,
}

impl BreathPhase {
    /// How long the driver waits in this phase before ticking.
    pub fn duration(self) -> Duration {
        Duration::from_secs(self.duration_secs())
    }

    pub fn duration_secs(self) -> u64 {
        match self {
            BreathPhase::Idle | BreathPhase::Complete => 0,
            BreathPhase::Inhale => 4,
            BreathPhase::HoldIn => 4,
            BreathPhase::Exhale => 6,
            BreathPhase::HoldOut => 2,
        }
    }

    /// Target scale of the breathing circle while this phase is active.
    pub fn target_scale(self) -> f64 {
        match self {
            BreathPhase::Inhale | BreathPhase::HoldIn => 1.6,
            _ => 1.0,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            BreathPhase::Idle => "Tap Begin to start",
            BreathPhase::Inhale => "Breathe In",
            BreathPhase::HoldIn => "Hold",
            BreathPhase::Exhale => "Breathe Out",
            BreathPhase::HoldOut => "Hold",
            BreathPhase::Complete => "Well done",
        }
    }

    pub fn next(self) -> BreathPhase {
        match self {
            BreathPhase::Idle => BreathPhase::Inhale,
            BreathPhase::Inhale => BreathPhase::HoldIn,
            BreathPhase::HoldIn => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::HoldOut,
            BreathPhase::HoldOut => BreathPhase::Inhale,
            BreathPhase::Complete => BreathPhase::Idle,
        }
    }

    /// Whether this is one of the four timed breathing phases.
    pub fn is_active(self) -> bool {
        !matches!(self, BreathPhase::Idle | BreathPhase::Complete)
    }
}
