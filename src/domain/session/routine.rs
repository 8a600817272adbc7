use std::sync::Arc;

use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;

use crate::domain::engine::{SessionOutcome, TimerEngine};
use crate::domain::outbound::{SessionEvent, SessionObserver};
use crate::domain::session::handle::Command;
use crate::domain::session::state::SessionState;
use crate::tracing_report;

/// A [`SessionContext`] stores all objects relavent to the [`SessionRoutine`]
/// and the timer logic.
pub struct SessionContext {
    pub engine: TimerEngine,
    pub commands: Receiver<Command>,
    pub observer: Arc<dyn SessionObserver>,
    pub outcome: Option<SessionOutcome>,
}

impl SessionContext {
    /// Creates a new [`SessionContext`].
    pub fn new(
        engine: TimerEngine,
        commands: Receiver<Command>,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        Self {
            engine,
            commands,
            observer,
            outcome: None,
        }
    }

    /// Forward a command to the engine.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.engine.start(),
            Command::Toggle => self.engine.toggle(),
            Command::Stop => self.engine.stop(),
            Command::Finish => self.engine.finish(),
            Command::MarkRound => self.engine.mark_round(),
            Command::Query { responder } => {
                let _ = responder.send(self.engine.snapshot());
            }
        }
    }

    /// Publish every event the engine queued since the last call.
    pub async fn publish(&mut self) {
        let events: Vec<_> = self.engine.drain_events().collect();
        for event in events {
            self.emit(SessionEvent::Timer(event)).await;
        }
    }

    /// Present one event. Failures are logged and otherwise ignored.
    pub async fn emit(&self, event: SessionEvent) {
        if let Err(err) = self.observer.observe(&event).await {
            tracing_report!(err);
        }
    }
}

/// A type responsible for running one workout session. A [`SessionRoutine`]
/// runs on background, receiving [`Command`]s from [`SessionHandle`], and
/// owns the one-second tick source.
///
/// [`SessionHandle`]: crate::domain::session::SessionHandle
pub struct SessionRoutine {
    context: SessionContext,
    state: SessionState,
}

impl SessionRoutine {
    /// Spawn a [`SessionRoutine`] on background. The returned task resolves
    /// to the session's outcome.
    pub fn spawn(
        engine: TimerEngine,
        commands: Receiver<Command>,
        observer: Arc<dyn SessionObserver>,
    ) -> JoinHandle<Option<SessionOutcome>> {
        tokio::spawn(async {
            let mut routine = Self {
                context: SessionContext::new(engine, commands, observer),
                state: SessionState::new(),
            };
            routine.run().await
        })
    }

    /// Main part of its business logic.
    async fn run(&mut self) -> Option<SessionOutcome> {
        tracing::info!(variant = %self.context.engine.variant(), "Session ready");
        while !self.state.is_closed() {
            self.state.run(&mut self.context).await;
        }
        self.context.outcome
    }
}
