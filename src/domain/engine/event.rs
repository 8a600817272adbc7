use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use crate::domain::entity::CountdownStep;

/// Transient notifications raised by a [`TimerEngine`] while it runs.
///
/// [`TimerEngine`]: crate::domain::engine::TimerEngine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum TimerEvent {
    /// A pre-roll step became visible.
    CountdownPulse { step: CountdownStep },
    /// The pre-roll is over and the main clock has started.
    CountdownFinished,
    /// A new round started. For Tabata this is also the switch back to
    /// work.
    RoundStarted { round: u64 },
    /// Tabata switched from work to rest within `round`.
    RestStarted { round: u64 },
    /// An AMRAP round was marked complete after `lap` seconds.
    RoundMarked { rounds: u64, lap: u64 },
    Paused,
    Resumed,
}

/// The single terminal notification of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome")]
pub enum SessionOutcome {
    /// The workout ended naturally. `result` is the elapsed seconds for For
    /// Time and the final round otherwise.
    Completed { result: u64 },
    /// The user abandoned the workout.
    Stopped,
}

impl Display for SessionOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Completed { result } => write!(f, "Completed with result {result}"),
            Self::Stopped => f.write_str("Stopped"),
        }
    }
}
