use serde::{Deserialize, Serialize};

pub const DEFAULT_EMOM_ROUNDS: u64 = 10;
pub const DEFAULT_INTERVAL_DURATION: u64 = 60;
pub const DEFAULT_TOTAL_DURATION: u64 = 300;
pub const DEFAULT_TIME_CAP: u64 = 3600;
pub const DEFAULT_TABATA_ROUNDS: u64 = 8;
pub const DEFAULT_WORK_DURATION: u64 = 20;
pub const DEFAULT_REST_DURATION: u64 = 10;

/// Raw timer parameters as they arrive from a workout catalog or the
/// command line. Every field is optional and only the fields relevant to
/// the chosen [`TimerVariant`] are read. Durations are in seconds.
///
/// [`TimerVariant`]: crate::domain::entity::TimerVariant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// EMOM and Tabata.
    pub rounds: Option<u64>,
    /// EMOM.
    pub interval_duration: Option<u64>,
    /// AMRAP.
    pub total_duration: Option<u64>,
    /// For Time. Only affects the progress ring.
    pub time_cap: Option<u64>,
    /// Tabata.
    pub work_duration: Option<u64>,
    /// Tabata.
    pub rest_duration: Option<u64>,
}

impl TimerConfig {
    /// Configuration of an EMOM workout.
    pub fn emom(rounds: u64, interval_duration: u64) -> Self {
        Self {
            rounds: Some(rounds),
            interval_duration: Some(interval_duration),
            ..Self::default()
        }
    }

    /// Configuration of an AMRAP workout.
    pub fn amrap(total_duration: u64) -> Self {
        Self {
            total_duration: Some(total_duration),
            ..Self::default()
        }
    }

    /// Configuration of a Tabata workout.
    pub fn tabata(rounds: u64, work_duration: u64, rest_duration: u64) -> Self {
        Self {
            rounds: Some(rounds),
            work_duration: Some(work_duration),
            rest_duration: Some(rest_duration),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserialize_partial() {
        let config: TimerConfig = toml::from_str("rounds = 5\nwork_duration = 40").unwrap();
        assert_eq!(
            config,
            TimerConfig {
                rounds: Some(5),
                work_duration: Some(40),
                ..TimerConfig::default()
            }
        );
    }

    #[test]
    fn config_constructors() {
        assert_eq!(TimerConfig::emom(3, 2).interval_duration, Some(2));
        assert_eq!(TimerConfig::amrap(600).total_duration, Some(600));
        assert_eq!(TimerConfig::tabata(8, 20, 10).rest_duration, Some(10));
    }
}
