use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::{ParseTimerVariantError, WorkoutPlan};

/// An abstract interface for accessing the workout catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WorkoutRepository: Send + Sync + 'static {
    /// Get the workout called `name`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the workout doesn't exist or
    /// failed to load.
    async fn workout(&self, name: &str) -> Result<WorkoutPlan, GetWorkoutError>;

    /// Get every workout in catalog order.
    ///
    /// # Errors
    ///
    /// This function will return an error if the catalog failed to load.
    async fn workouts(&self) -> Result<Vec<WorkoutPlan>, GetWorkoutError>;
}

/// An error type of accessing the repository of [`WorkoutPlan`]s.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
#[non_exhaustive]
pub enum GetWorkoutError {
    #[snafu(display("Could not find workout {name:?}"))]
    #[non_exhaustive]
    NotFound { name: String },
    #[snafu(display("Workout {name:?} has an invalid timer kind"))]
    #[non_exhaustive]
    Invalid {
        name: String,
        source: ParseTimerVariantError,
    },
    #[snafu(whatever, display("Load workout failed: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}
