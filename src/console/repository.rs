use std::sync::Arc;

use snafu::prelude::*;

use crate::console::config::{Configuration, WorkoutContent};
use crate::domain::entity::{TimerVariant, WorkoutPlan};
use crate::domain::repository::workout::{InvalidSnafu, NotFoundSnafu};
use crate::domain::repository::{GetWorkoutError, WorkoutRepository};

/// A [`WorkoutRepository`] implementation which reads configuration files.
pub struct WorkoutConfiguration {
    config: Arc<Configuration>,
}

impl WorkoutConfiguration {
    /// Creates a new [`WorkoutConfiguration`].
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }

    fn plan(content: &WorkoutContent) -> Result<WorkoutPlan, GetWorkoutError> {
        let variant: TimerVariant = content.kind.parse().context(InvalidSnafu {
            name: content.name.as_str(),
        })?;
        Ok(WorkoutPlan {
            name: content.name.clone(),
            variant,
            config: content.config.clone(),
            description: content.description.clone(),
        })
    }
}

#[async_trait::async_trait]
impl WorkoutRepository for WorkoutConfiguration {
    async fn workout(&self, name: &str) -> Result<WorkoutPlan, GetWorkoutError> {
        // First match wins when names repeat.
        let content = self
            .config
            .workout
            .iter()
            .find(|content| content.name == name)
            .context(NotFoundSnafu { name })?;
        Self::plan(content)
    }

    async fn workouts(&self) -> Result<Vec<WorkoutPlan>, GetWorkoutError> {
        self.config.workout.iter().map(Self::plan).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::entity::TimerConfig;

    #[tokio::test]
    async fn workout_by_name() {
        let repository = repository(vec![
            content("murph", "stopwatch", TimerConfig::default()),
            content("tabata", "HIIT", TimerConfig::tabata(4, 30, 15)),
        ]);

        let plan = repository.workout("tabata").await.unwrap();
        assert_eq!(plan.variant, TimerVariant::Tabata);
        assert_eq!(plan.config, TimerConfig::tabata(4, 30, 15));
        assert_eq!(plan.description.as_deref(), Some("about tabata"));

        assert!(matches!(
            repository.workout("fran").await,
            Err(GetWorkoutError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn workout_with_unknown_kind() {
        let repository = repository(vec![content("yoga", "stretch", TimerConfig::default())]);
        assert!(matches!(
            repository.workout("yoga").await,
            Err(GetWorkoutError::Invalid { .. })
        ));
        assert!(repository.workouts().await.is_err());
    }

    #[tokio::test]
    async fn workouts_in_file_order() {
        let repository = repository(vec![
            content("b", "EMOM", TimerConfig::emom(5, 30)),
            content("a", "amrap", TimerConfig::amrap(600)),
        ]);
        let names: Vec<_> = repository
            .workouts()
            .await
            .unwrap()
            .into_iter()
            .map(|plan| (plan.name, plan.variant))
            .collect();
        assert_eq!(
            names,
            vec![
                ("b".to_owned(), TimerVariant::Emom),
                ("a".to_owned(), TimerVariant::Amrap)
            ]
        );
    }

    fn repository(workout: Vec<WorkoutContent>) -> WorkoutConfiguration {
        WorkoutConfiguration::new(Arc::new(Configuration { workout }))
    }

    fn content(name: &str, kind: &str, config: TimerConfig) -> WorkoutContent {
        WorkoutContent {
            name: name.to_owned(),
            kind: kind.to_owned(),
            description: Some(format!("about {name}")),
            config,
        }
    }
}
