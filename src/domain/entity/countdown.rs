use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// One visible step of the 3-2-1-GO pre-roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountdownStep {
    Three,
    Two,
    One,
    Go,
}

impl CountdownStep {
    /// Get the first step of every pre-roll.
    pub fn initial() -> Self {
        Self::Three
    }

    /// Get the step after this one, or `None` once `Go` has been shown.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Three => Some(Self::Two),
            Self::Two => Some(Self::One),
            Self::One => Some(Self::Go),
            Self::Go => None,
        }
    }
}

impl Display for CountdownStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Three => f.write_str("3"),
            Self::Two => f.write_str("2"),
            Self::One => f.write_str("1"),
            Self::Go => f.write_str("GO!"),
        }
    }
}

/// What happened when the pre-roll advanced by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownAdvance {
    Pulse(CountdownStep),
    Finished,
    Idle,
}

/// The pre-roll sub-machine: `3 -> 2 -> 1 -> Go -> Done`, one second per
/// state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    current: Option<CountdownStep>,
    done: bool,
}

impl Countdown {
    /// Creates an inactive [`Countdown`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to `3` and return the first pulse.
    pub fn activate(&mut self) -> CountdownStep {
        let step = CountdownStep::initial();
        self.current = Some(step);
        self.done = false;
        step
    }

    /// Advance by one second.
    pub fn advance(&mut self) -> CountdownAdvance {
        match self.current {
            Some(step) => match step.next() {
                Some(next) => {
                    self.current = Some(next);
                    CountdownAdvance::Pulse(next)
                }
                None => {
                    self.current = None;
                    self.done = true;
                    CountdownAdvance::Finished
                }
            },
            None => CountdownAdvance::Idle,
        }
    }

    /// Returns the step currently on screen.
    pub fn current(&self) -> Option<CountdownStep> {
        self.current
    }

    /// Returns `true` once `Done` has been reached.
    pub fn is_done(&self) -> bool {
        self.done
    }
}
