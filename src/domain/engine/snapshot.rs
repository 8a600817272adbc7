use serde::Serialize;

use crate::domain::entity::{Direction, Phase, TimerVariant};

/// Everything a presentation layer needs to render the timer at one
/// instant. Derived from the engine on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub variant: TimerVariant,
    pub phase: Phase,
    /// Remaining seconds, or elapsed seconds for For Time.
    pub seconds: u64,
    /// `seconds` formatted the way the variant shows it.
    pub display: String,
    pub label: &'static str,
    pub round: u64,
    pub total_rounds: Option<u64>,
    pub work_phase: bool,
    pub laps: Vec<u64>,
    pub average_lap: u64,
    pub progress: f64,
    pub direction: Direction,
}

impl TimerSnapshot {
    /// Human readable "Round x of y", when the variant has a fixed number of
    /// rounds.
    pub fn round_caption(&self) -> Option<String> {
        self.total_rounds
            .map(|total| format!("Round {} of {}", self.round, total))
    }
}
