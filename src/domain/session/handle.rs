use snafu::prelude::*;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Sender as OneshotSender};
use tokio::task::{JoinError, JoinHandle};

use crate::domain::engine::{SessionOutcome, TimerSnapshot};

/// Actions that a [`SessionRoutine`] runs.
///
/// [`SessionRoutine`]: crate::domain::session::routine::SessionRoutine
#[derive(Debug)]
pub enum Command {
    Start,
    Toggle,
    Stop,
    Finish,
    MarkRound,
    Query {
        responder: OneshotSender<TimerSnapshot>,
    },
}

/// Handle that controls a [`SessionRoutine`].
///
/// [`SessionRoutine`]: crate::domain::session::routine::SessionRoutine
#[derive(Debug, Clone)]
pub struct SessionHandle {
    requester: Sender<Command>,
}

impl SessionHandle {
    /// Creates a new [`SessionHandle`].
    pub fn new(requester: Sender<Command>) -> Self {
        Self { requester }
    }

    /// Send [`Command::Start`] to the session and begin the pre-roll.
    pub async fn start(&self) -> Result<(), SendCommandError> {
        self.send(Command::Start).await
    }

    /// Send [`Command::Toggle`] to the session to play or pause.
    pub async fn toggle(&self) -> Result<(), SendCommandError> {
        self.send(Command::Toggle).await
    }

    /// Send [`Command::Stop`] to the session and abandon the workout.
    pub async fn stop(&self) -> Result<(), SendCommandError> {
        self.send(Command::Stop).await
    }

    /// Send [`Command::Finish`] to the session and complete the workout now.
    pub async fn finish(&self) -> Result<(), SendCommandError> {
        self.send(Command::Finish).await
    }

    /// Send [`Command::MarkRound`] to the session.
    pub async fn mark_round(&self) -> Result<(), SendCommandError> {
        self.send(Command::MarkRound).await
    }

    /// Send [`Command::Query`] to the session to get the current state.
    pub async fn query(&self) -> Result<TimerSnapshot, SendCommandError> {
        let (responder, receiver) = oneshot::channel();
        self.send(Command::Query { responder }).await?;
        receiver.await.map_err(|_| ClosedSnafu.build())
    }

    async fn send(&self, command: Command) -> Result<(), SendCommandError> {
        self.requester
            .send(command)
            .await
            .map_err(|_| ClosedSnafu.build())
    }
}

/// An error for controlling a session whose routine has already ended.
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum SendCommandError {
    #[snafu(display("The timer session has already ended"))]
    #[non_exhaustive]
    Closed,
}

/// Resolves once the session routine has exited.
#[derive(Debug)]
pub struct SessionCompletion {
    task: JoinHandle<Option<SessionOutcome>>,
}

impl SessionCompletion {
    /// Creates a new [`SessionCompletion`].
    pub fn new(task: JoinHandle<Option<SessionOutcome>>) -> Self {
        Self { task }
    }

    /// Wait for the session to end. Returns `None` if every handle was dropped
    /// before the workout ended.
    ///
    /// # Errors
    ///
    /// This function will return an error if the routine panicked or was
    /// cancelled.
    pub async fn wait(self) -> Result<Option<SessionOutcome>, WaitSessionError> {
        self.task.await.context(JoinSnafu)
    }
}

/// An error for waiting on a session routine.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum WaitSessionError {
    #[snafu(display("The timer session routine did not run to completion"))]
    Join { source: JoinError },
}
