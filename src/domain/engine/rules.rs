use snafu::prelude::*;

use crate::domain::engine::event::TimerEvent;
use crate::domain::entity::config::{
    DEFAULT_EMOM_ROUNDS, DEFAULT_INTERVAL_DURATION, DEFAULT_REST_DURATION, DEFAULT_TABATA_ROUNDS,
    DEFAULT_TIME_CAP, DEFAULT_TOTAL_DURATION, DEFAULT_WORK_DURATION,
};
use crate::domain::entity::{
    format_clock, Direction, Positive, Progress, TimerConfig, TimerVariant, TryNewPositiveError,
};

/// The mutable counters a variant operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    /// Remaining seconds, or elapsed seconds for For Time. Only negative
    /// inside a tick, while a boundary is being crossed.
    pub seconds: i64,
    pub round: u64,
    /// Tabata only.
    pub work: bool,
}

impl Clock {
    pub fn new(seconds: i64) -> Self {
        Self {
            seconds,
            round: 1,
            work: true,
        }
    }

    pub fn seconds(&self) -> u64 {
        u64::try_from(self.seconds).unwrap_or(0)
    }
}

/// Result of one tick applied to a [`Clock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Continue,
    Transition(TimerEvent),
    Complete,
}

/// Behavior that differs between timer variants.
#[enum_dispatch::enum_dispatch]
pub trait VariantRules {
    fn variant(&self) -> TimerVariant;

    /// Value of the clock when the main timer starts.
    fn initial_seconds(&self) -> i64;

    /// Apply one second to the clock.
    fn advance(&self, clock: &mut Clock) -> Advance;

    fn progress(&self, clock: &Clock) -> Progress;

    /// Scalar reported on natural completion.
    fn result(&self, clock: &Clock) -> u64 {
        clock.round
    }

    /// Number of rounds to show as "Round x of y", if the variant has a
    /// fixed count.
    fn total_rounds(&self) -> Option<u64> {
        None
    }

    /// Seconds since the start of the session for variants that support
    /// marking rounds.
    fn lap_elapsed(&self, _clock: &Clock) -> Option<u64> {
        None
    }

    fn label(&self, clock: &Clock) -> &'static str;

    fn display_time(&self, clock: &Clock) -> String {
        clock.seconds().to_string()
    }
}

/// Validated rules of one session, selected once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[enum_dispatch::enum_dispatch(VariantRules)]
pub enum Rules {
    Emom(EmomRules),
    Amrap(AmrapRules),
    ForTime(ForTimeRules),
    Tabata(TabataRules),
}

impl Rules {
    /// Validate a raw [`TimerConfig`] for a variant, filling in defaults for
    /// omitted fields.
    ///
    /// # Errors
    ///
    /// This function will return an error if any relevant field is zero.
    pub fn try_new(variant: TimerVariant, config: &TimerConfig) -> Result<Self, InvalidConfigError> {
        let field = |name: &'static str, value: Option<u64>, default: u64| {
            Positive::try_new(value.unwrap_or(default)).context(FieldSnafu {
                variant,
                field: name,
            })
        };

        let rules: Rules = match variant {
            TimerVariant::Emom => EmomRules {
                rounds: field("rounds", config.rounds, DEFAULT_EMOM_ROUNDS)?,
                interval: field(
                    "interval duration",
                    config.interval_duration,
                    DEFAULT_INTERVAL_DURATION,
                )?,
            }
            .into(),
            TimerVariant::Amrap => AmrapRules {
                total: field(
                    "total duration",
                    config.total_duration,
                    DEFAULT_TOTAL_DURATION,
                )?,
            }
            .into(),
            TimerVariant::ForTime => ForTimeRules {
                cap: field("time cap", config.time_cap, DEFAULT_TIME_CAP)?,
            }
            .into(),
            TimerVariant::Tabata => TabataRules {
                rounds: field("rounds", config.rounds, DEFAULT_TABATA_ROUNDS)?,
                work: field("work duration", config.work_duration, DEFAULT_WORK_DURATION)?,
                rest: field("rest duration", config.rest_duration, DEFAULT_REST_DURATION)?,
            }
            .into(),
        };

        Ok(rules)
    }
}

/// An error type of validating a [`TimerConfig`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidConfigError {
    #[snafu(display("Invalid {field} for {variant} timer"))]
    #[non_exhaustive]
    Field {
        variant: TimerVariant,
        field: &'static str,
        source: TryNewPositiveError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmomRules {
    rounds: Positive,
    interval: Positive,
}

impl VariantRules for EmomRules {
    fn variant(&self) -> TimerVariant {
        TimerVariant::Emom
    }

    fn initial_seconds(&self) -> i64 {
        self.interval.signed()
    }

    fn advance(&self, clock: &mut Clock) -> Advance {
        clock.seconds -= 1;
        if clock.seconds >= 0 {
            return Advance::Continue;
        }

        if clock.round + 1 > self.rounds.get() {
            clock.seconds = 0;
            return Advance::Complete;
        }

        clock.round += 1;
        clock.seconds = self.interval.signed();
        Advance::Transition(TimerEvent::RoundStarted { round: clock.round })
    }

    fn progress(&self, clock: &Clock) -> Progress {
        Progress::of(clock.seconds, self.interval.signed(), Direction::Emptying)
    }

    fn total_rounds(&self) -> Option<u64> {
        Some(self.rounds.get())
    }

    fn label(&self, _clock: &Clock) -> &'static str {
        "seconds"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmrapRules {
    total: Positive,
}

impl VariantRules for AmrapRules {
    fn variant(&self) -> TimerVariant {
        TimerVariant::Amrap
    }

    fn initial_seconds(&self) -> i64 {
        self.total.signed()
    }

    fn advance(&self, clock: &mut Clock) -> Advance {
        clock.seconds -= 1;
        if clock.seconds <= 0 {
            clock.seconds = 0;
            Advance::Complete
        } else {
            Advance::Continue
        }
    }

    fn progress(&self, clock: &Clock) -> Progress {
        let total = self.total.signed();
        Progress::of(total - clock.seconds, total, Direction::Filling)
    }

    fn lap_elapsed(&self, clock: &Clock) -> Option<u64> {
        Some(self.total.get().saturating_sub(clock.seconds()))
    }

    fn label(&self, _clock: &Clock) -> &'static str {
        "minutes remaining"
    }

    fn display_time(&self, clock: &Clock) -> String {
        format_clock(clock.seconds())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForTimeRules {
    cap: Positive,
}

impl VariantRules for ForTimeRules {
    fn variant(&self) -> TimerVariant {
        TimerVariant::ForTime
    }

    fn initial_seconds(&self) -> i64 {
        0
    }

    fn advance(&self, clock: &mut Clock) -> Advance {
        clock.seconds += 1;
        Advance::Continue
    }

    fn progress(&self, clock: &Clock) -> Progress {
        Progress::of(clock.seconds, self.cap.signed(), Direction::Filling)
    }

    fn result(&self, clock: &Clock) -> u64 {
        clock.seconds()
    }

    fn label(&self, _clock: &Clock) -> &'static str {
        "elapsed"
    }

    fn display_time(&self, clock: &Clock) -> String {
        format_clock(clock.seconds())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabataRules {
    rounds: Positive,
    work: Positive,
    rest: Positive,
}

impl TabataRules {
    fn phase_max(&self, work: bool) -> Positive {
        if work {
            self.work
        } else {
            self.rest
        }
    }
}

impl VariantRules for TabataRules {
    fn variant(&self) -> TimerVariant {
        TimerVariant::Tabata
    }

    fn initial_seconds(&self) -> i64 {
        self.work.signed()
    }

    fn advance(&self, clock: &mut Clock) -> Advance {
        clock.seconds -= 1;
        if clock.seconds >= 0 {
            return Advance::Continue;
        }

        if clock.work {
            clock.work = false;
            clock.seconds = self.rest.signed();
            return Advance::Transition(TimerEvent::RestStarted { round: clock.round });
        }

        if clock.round + 1 > self.rounds.get() {
            clock.seconds = 0;
            return Advance::Complete;
        }

        clock.round += 1;
        clock.work = true;
        clock.seconds = self.work.signed();
        Advance::Transition(TimerEvent::RoundStarted { round: clock.round })
    }

    fn progress(&self, clock: &Clock) -> Progress {
        let max = self.phase_max(clock.work).signed();
        Progress::of(max - clock.seconds, max, Direction::Filling)
    }

    fn total_rounds(&self) -> Option<u64> {
        Some(self.rounds.get())
    }

    fn label(&self, clock: &Clock) -> &'static str {
        if clock.work {
            "WORK"
        } else {
            "REST"
        }
    }
}
