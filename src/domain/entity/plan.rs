use crate::domain::entity::config::{
    TimerConfig, DEFAULT_EMOM_ROUNDS, DEFAULT_INTERVAL_DURATION, DEFAULT_REST_DURATION,
    DEFAULT_TABATA_ROUNDS, DEFAULT_TIME_CAP, DEFAULT_TOTAL_DURATION, DEFAULT_WORK_DURATION,
};
use crate::domain::entity::progress::format_clock;
use crate::domain::entity::variant::TimerVariant;

/// A named workout from the catalog, ready to be turned into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutPlan {
    pub name: String,
    pub variant: TimerVariant,
    pub config: TimerConfig,
    pub description: Option<String>,
}

impl WorkoutPlan {
    /// Creates a new [`WorkoutPlan`] without description.
    pub fn new(name: impl Into<String>, variant: TimerVariant, config: TimerConfig) -> Self {
        Self {
            name: name.into(),
            variant,
            config,
            description: None,
        }
    }

    /// One-line summary of the configured parameters, with defaults filled
    /// in. Values are not validated here.
    pub fn summary(&self) -> String {
        let config = &self.config;
        match self.variant {
            TimerVariant::Emom => format!(
                "{} rounds every {}",
                config.rounds.unwrap_or(DEFAULT_EMOM_ROUNDS),
                format_clock(config.interval_duration.unwrap_or(DEFAULT_INTERVAL_DURATION)),
            ),
            TimerVariant::Amrap => format!(
                "{} on the clock",
                format_clock(config.total_duration.unwrap_or(DEFAULT_TOTAL_DURATION)),
            ),
            TimerVariant::ForTime => format!(
                "as fast as possible, cap {}",
                format_clock(config.time_cap.unwrap_or(DEFAULT_TIME_CAP)),
            ),
            TimerVariant::Tabata => format!(
                "{} rounds of {}s work / {}s rest",
                config.rounds.unwrap_or(DEFAULT_TABATA_ROUNDS),
                config.work_duration.unwrap_or(DEFAULT_WORK_DURATION),
                config.rest_duration.unwrap_or(DEFAULT_REST_DURATION),
            ),
        }
    }
}
