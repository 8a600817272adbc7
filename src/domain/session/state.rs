use tokio::time::{Duration, Interval};

use crate::domain::entity::Phase;
use crate::domain::outbound::SessionEvent;
use crate::domain::session::routine::SessionContext;

/// Period of the tick source.
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug)]
#[repr(transparent)]
pub struct SessionState {
    inner: Option<SessionStateInner>,
}

impl SessionState {
    /// Creates a new [`SessionState`].
    pub fn new() -> Self {
        Self {
            inner: Some(SessionStateInner::new()),
        }
    }

    /// Do the session logic based on its inner state.
    pub async fn run(&mut self, context: &mut SessionContext) {
        self.inner = match self.inner.take() {
            Some(inner) => Some(inner.run(context).await),
            None => unreachable!("`SessionState`'s inner should not be `None`"),
        };
    }

    /// Returns `true` if the routine has nothing left to do.
    pub fn is_closed(&self) -> bool {
        matches!(self.inner, Some(SessionStateInner::Closed(_)))
    }
}

#[enum_dispatch::enum_dispatch]
trait StateRun {
    async fn run(self, context: &mut SessionContext) -> SessionStateInner;
}

/// Actual implementation of running state of [`SessionRoutine`]. Only
/// [`TickingState`] owns a tick source, so leaving it cancels the ticks.
///
/// [`SessionRoutine`]: crate::domain::session::routine::SessionRoutine
#[derive(Debug)]
#[enum_dispatch::enum_dispatch(StateRun)]
enum SessionStateInner {
    Idle(IdleState),
    Ticking(TickingState),
    Suspended(SuspendedState),
    Finished(FinishedState),
    Closed(ClosedState),
}

impl SessionStateInner {
    pub fn new() -> Self {
        Self::Idle(IdleState)
    }
}

/// A state which indicates that the workout hasn't started yet.
#[derive(Debug)]
struct IdleState;

impl StateRun for IdleState {
    async fn run(self, context: &mut SessionContext) -> SessionStateInner {
        match context.commands.recv().await {
            Some(command) => {
                context.apply(command);
                context.publish().await;
                settle(context).await
            }
            None => {
                tracing::debug!("Session abandoned before start");
                ClosedState.into()
            }
        }
    }
}

/// A state which indicates that the pre-roll or the main clock is running,
/// with a tick source working internally.
#[derive(Debug)]
struct TickingState {
    ticker: Interval,
}

impl StateRun for TickingState {
    async fn run(mut self, context: &mut SessionContext) -> SessionStateInner {
        // Commands are polled first so that a stop queued before a due tick
        // always wins.
        tokio::select! {
            biased;
            command = context.commands.recv() => match command {
                Some(command) => {
                    context.apply(command);
                    context.publish().await;
                }
                None => {
                    tracing::info!(phase = %context.engine.phase(), "Session abandoned while ticking");
                    return ClosedState.into();
                }
            },
            _ = self.ticker.tick() => Self::handle_tick(context).await,
        }

        if context.engine.phase().is_ticking() {
            self.into()
        } else {
            settle(context).await
        }
    }
}

impl TickingState {
    async fn handle_tick(context: &mut SessionContext) {
        context.engine.tick();
        context.publish().await;

        if context.engine.phase() != Phase::CountingDown {
            let snapshot = context.engine.snapshot();
            context.emit(SessionEvent::Tick(snapshot)).await;
        }
    }
}

/// A state which indicates that the workout is paused. No tick source
/// exists until it resumes.
#[derive(Debug)]
struct SuspendedState;

impl StateRun for SuspendedState {
    async fn run(self, context: &mut SessionContext) -> SessionStateInner {
        match context.commands.recv().await {
            Some(command) => {
                context.apply(command);
                context.publish().await;
                settle(context).await
            }
            None => {
                tracing::debug!("Session abandoned while paused");
                ClosedState.into()
            }
        }
    }
}

/// A state which indicates that the engine reached a terminal phase and its
/// outcome is waiting to be published.
#[derive(Debug)]
struct FinishedState;

impl StateRun for FinishedState {
    async fn run(self, context: &mut SessionContext) -> SessionStateInner {
        // Publish on the next scheduling turn, never inline with the
        // transition that produced the outcome.
        tokio::task::yield_now().await;

        if let Some(outcome) = context.engine.take_outcome() {
            tracing::info!(%outcome, "Session finished");
            let snapshot = context.engine.snapshot();
            context
                .emit(SessionEvent::Finished { outcome, snapshot })
                .await;
            context.outcome = Some(outcome);
        }

        ClosedState.into()
    }
}

/// A state which indicates that [`SessionRoutine`] should stop running.
///
/// [`SessionRoutine`]: crate::domain::session::routine::SessionRoutine
#[derive(Debug)]
struct ClosedState;

impl StateRun for ClosedState {
    async fn run(self, _context: &mut SessionContext) -> SessionStateInner {
        self.into()
    }
}

/// Pick the state matching the engine's phase after a command was applied
/// outside [`TickingState`].
async fn settle(context: &mut SessionContext) -> SessionStateInner {
    match context.engine.phase() {
        Phase::Idle => IdleState.into(),
        Phase::CountingDown | Phase::Running => {
            tracing::info!(phase = %context.engine.phase(), "Tick source armed");
            TickingState {
                ticker: spawn_ticker().await,
            }
            .into()
        }
        Phase::Paused => {
            tracing::info!("Tick source released");
            SuspendedState.into()
        }
        Phase::Completed | Phase::Stopped => FinishedState.into(),
    }
}

/// Create a fresh one-second interval whose first tick fires one period from
/// now.
async fn spawn_ticker() -> Interval {
    let mut ticker = tokio::time::interval(TICK);
    ticker.tick().await;
    ticker
}
