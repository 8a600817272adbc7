mod handle;
mod routine;
mod state;

pub use handle::{SendCommandError, SessionCompletion, SessionHandle, WaitSessionError};

use std::sync::Arc;

use snafu::prelude::*;

use crate::domain::engine::{InvalidConfigError, TimerEngine};
use crate::domain::entity::WorkoutPlan;
use crate::domain::outbound::SessionObserver;

use routine::SessionRoutine;

/// Build a timer engine for `plan` and spawn a session routine driving it.
///
/// # Errors
///
/// This function will return an error if the plan's configuration is
/// invalid.
pub fn spawn(
    plan: &WorkoutPlan,
    observer: Arc<dyn SessionObserver>,
) -> Result<(SessionHandle, SessionCompletion), SpawnSessionError> {
    let engine = TimerEngine::new(plan.variant, &plan.config).context(ConfigSnafu {
        name: plan.name.as_str(),
    })?;

    tracing::info!(
        workout = %plan.name,
        variant = %plan.variant,
        summary = %plan.summary(),
        "Spawning session"
    );

    let (requester, commands) = tokio::sync::mpsc::channel(1);
    let task = SessionRoutine::spawn(engine, commands, observer);
    Ok((SessionHandle::new(requester), SessionCompletion::new(task)))
}

/// An error for spawning a session.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SpawnSessionError {
    #[snafu(display("Could not build a timer for workout {name:?}"))]
    Config {
        name: String,
        source: InvalidConfigError,
    },
}
