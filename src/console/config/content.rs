use serde::Deserialize;

use crate::domain::entity::TimerConfig;

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    /// Workout catalog, in file order.
    #[serde(default)]
    pub workout: Vec<WorkoutContent>,
}

/// One `[[workout]]` table. The timer kind stays raw text until the
/// workout is requested.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkoutContent {
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub config: TimerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_deserialize() {
        let content = r#"
            [[workout]]
            name = "cindy"
            kind = "AMRAP"
            description = "5 pull-ups, 10 push-ups, 15 squats"
            total_duration = 1200

            [[workout]]
            name = "intervals"
            kind = "hiit"
            rounds = 6
        "#;
        let configuration: Configuration = toml::from_str(content).unwrap();
        assert_eq!(configuration.workout.len(), 2);

        let cindy = &configuration.workout[0];
        assert_eq!(cindy.kind, "AMRAP");
        assert_eq!(cindy.config, TimerConfig::amrap(1200));
        assert!(cindy.description.is_some());

        let intervals = &configuration.workout[1];
        assert_eq!(intervals.config.rounds, Some(6));
        assert_eq!(intervals.config.work_duration, None);
        assert_eq!(intervals.description, None);
    }

    #[test]
    fn configuration_empty() {
        let configuration: Configuration = toml::from_str("").unwrap();
        assert!(configuration.workout.is_empty());
    }
}
