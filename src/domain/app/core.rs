use std::sync::Arc;

use snafu::prelude::*;

use crate::domain::app::service::{ControlService, QueryService};
use crate::domain::entity::WorkoutPlan;
use crate::domain::inbound::{ControlPort, QueryPort};
use crate::domain::outbound::SessionObserver;
use crate::domain::repository::{GetWorkoutError, WorkoutRepository};
use crate::domain::session::{self, SessionCompletion, SpawnSessionError};

/// Which workout to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutSelection {
    /// A workout from the catalog, looked up by name.
    Named(String),
    /// A workout built from command line flags.
    Adhoc(WorkoutPlan),
}

/// Entrance to the domain logic, providing ports for external adapters.
pub struct ApplicationCore {
    pub plan: WorkoutPlan,
    pub control: Arc<dyn ControlPort>,
    pub query: Arc<dyn QueryPort>,
    pub completion: SessionCompletion,
}

impl ApplicationCore {
    /// Initialize the application by resolving the workout and spawning its
    /// session with the given observer attached.
    ///
    /// # Errors
    ///
    /// This function will return an error if the workout could not be found
    /// or its configuration is invalid.
    pub async fn setup(
        observer: Arc<dyn SessionObserver>,
        repository: Arc<dyn WorkoutRepository>,
        selection: WorkoutSelection,
    ) -> Result<ApplicationCore, SetupApplicationCoreError> {
        let plan = match selection {
            WorkoutSelection::Named(name) => {
                repository.workout(&name).await.context(WorkoutSnafu)?
            }
            WorkoutSelection::Adhoc(plan) => plan,
        };

        let (handle, completion) = session::spawn(&plan, observer).context(SessionSnafu)?;
        let handle = Arc::new(handle);

        let control_port = Arc::new(ControlService::new(Arc::clone(&handle)));
        let query_port = Arc::new(QueryService::new(handle));

        let app = ApplicationCore {
            plan,
            control: control_port,
            query: query_port,
            completion,
        };

        Ok(app)
    }
}

/// An error for initializing the application.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SetupApplicationCoreError {
    #[snafu(display("Could not load the workout"))]
    Workout { source: GetWorkoutError },
    #[snafu(display("Could not start a timer session"))]
    Session { source: SpawnSessionError },
}
