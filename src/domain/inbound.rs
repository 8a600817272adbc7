use crate::domain::engine::TimerSnapshot;
use crate::domain::session::SendCommandError;

/// A public port for driving the timer: play/pause, stop, finish and lap
/// marking.
#[async_trait::async_trait]
pub trait ControlPort: Send + Sync + 'static {
    /// Start the pre-roll.
    async fn start(&self) -> Result<(), SendCommandError>;

    /// Play/pause. Starts the pre-roll when idle.
    async fn toggle(&self) -> Result<(), SendCommandError>;

    /// Abandon the workout.
    async fn stop(&self) -> Result<(), SendCommandError>;

    /// Complete the workout now.
    async fn finish(&self) -> Result<(), SendCommandError>;

    /// Mark an AMRAP round as done.
    async fn mark_round(&self) -> Result<(), SendCommandError>;
}

/// A public port for querying the current state.
#[async_trait::async_trait]
pub trait QueryPort: Send + Sync + 'static {
    /// Do the query operation.
    async fn query(&self) -> Result<TimerSnapshot, SendCommandError>;
}
