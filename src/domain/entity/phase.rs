use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// The lifecycle phase of a timer session. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    CountingDown,
    Running,
    Paused,
    Completed,
    Stopped,
}

impl Phase {
    /// Get an initialized [`Phase`].
    pub fn initial() -> Self {
        Self::Idle
    }

    /// Returns `true` if the one-second tick source should be armed.
    pub fn is_ticking(self) -> bool {
        matches!(self, Self::CountingDown | Self::Running)
    }

    /// Returns `true` if the session has ended, either naturally or by the
    /// user.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Stopped)
    }

    /// Returns `true` if the main clock has started, i.e. the pre-roll has
    /// finished.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::CountingDown => f.write_str("Counting down"),
            Self::Running => f.write_str("Running"),
            Self::Paused => f.write_str("Paused"),
            Self::Completed => f.write_str("Completed"),
            Self::Stopped => f.write_str("Stopped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_predicates() {
        assert_eq!(Phase::initial(), Phase::Idle);
        assert!(Phase::CountingDown.is_ticking());
        assert!(Phase::Running.is_ticking());
        assert!(!Phase::Paused.is_ticking());
        assert!(Phase::Completed.is_terminal());
        assert!(Phase::Stopped.is_terminal());
        assert!(!Phase::Idle.is_terminal());
        assert!(Phase::Paused.is_active());
        assert!(!Phase::CountingDown.is_active());
    }
}
