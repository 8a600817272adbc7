use std::error::Error as StdError;

use serde::Serialize;
use snafu::prelude::*;

use crate::domain::engine::{SessionOutcome, TimerEvent, TimerSnapshot};

/// A public port for presenting what happens in a timer session.
#[async_trait::async_trait]
pub trait SessionObserver: Send + Sync + 'static {
    /// Present one event.
    ///
    /// # Errors
    ///
    /// This function will return an error if the event could not be shown.
    /// The session keeps running regardless.
    async fn observe(&self, event: &SessionEvent) -> Result<(), ObserveError>;
}

/// Events published by a running session, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A transient engine event such as a countdown pulse or a new round.
    Timer(TimerEvent),
    /// State after a one-second tick.
    Tick(TimerSnapshot),
    /// The session ended. Published exactly once.
    Finished {
        outcome: SessionOutcome,
        snapshot: TimerSnapshot,
    },
}

/// An error type of presenting a [`SessionEvent`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ObserveError {
    #[snafu(whatever, display("Could not present session event: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}
