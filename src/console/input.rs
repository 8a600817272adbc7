use std::io::{BufRead, Error as IoError};
use std::sync::Arc;

use snafu::prelude::*;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{self, Receiver};

use crate::domain::entity::Phase;
use crate::domain::inbound::{ControlPort, QueryPort};
use crate::domain::session::SendCommandError;

pub const QUIT_PROMPT: &str = "Quit workout? [y/N] ";

/// Read stdin line by line on a dedicated thread. A blocking read can't be
/// cancelled, so it must not hold up the runtime's shutdown.
pub fn stdin_lines() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel(1);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.blocking_send(line).is_err() {
                break;
            }
        }
    });
    receiver
}

/// A control typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Toggle,
    MarkRound,
    Finish,
    Quit,
}

impl Key {
    /// Parse one input line. Unknown input gives `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "p" => Some(Self::Toggle),
            "r" => Some(Self::MarkRound),
            "f" => Some(Self::Finish),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Why a [`Controller`] stopped reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlExit {
    /// The user confirmed quitting and the session was stopped.
    Stopped,
    /// The user quit before the workout was running.
    Abandoned,
    /// Input ended or the session is already over.
    Detached,
}

/// Turns input lines into commands on the [`ControlPort`].
pub struct Controller<W> {
    lines: Receiver<String>,
    control: Arc<dyn ControlPort>,
    query: Arc<dyn QueryPort>,
    prompt: W,
}

impl<W: AsyncWrite + Unpin + Send> Controller<W> {
    /// Creates a new [`Controller`].
    pub fn new(
        lines: Receiver<String>,
        control: Arc<dyn ControlPort>,
        query: Arc<dyn QueryPort>,
        prompt: W,
    ) -> Self {
        Self {
            lines,
            control,
            query,
            prompt,
        }
    }

    /// Forward input until it ends, the session ends or the user quits.
    ///
    /// # Errors
    ///
    /// This function will return an error if the quit prompt could not be
    /// written.
    pub async fn run(&mut self) -> Result<ControlExit, ControlError> {
        while let Some(line) = self.lines.recv().await {
            let res = match Key::parse(&line) {
                Some(Key::Toggle) => self.control.toggle().await,
                Some(Key::MarkRound) => self.control.mark_round().await,
                Some(Key::Finish) => self.control.finish().await,
                Some(Key::Quit) => match self.quit().await {
                    Ok(Some(exit)) => return Ok(exit),
                    Ok(None) => Ok(()),
                    Err(QuitError::Prompt { source }) => return Err(source),
                    Err(QuitError::Session { .. }) => return Ok(ControlExit::Detached),
                },
                None => {
                    tracing::warn!(input = %line, "Unknown control, use p, r, f or q");
                    Ok(())
                }
            };

            if res.is_err() {
                tracing::debug!("Session ended, input detached");
                return Ok(ControlExit::Detached);
            }
        }

        tracing::debug!("Input closed");
        Ok(ControlExit::Detached)
    }

    /// Pause, ask for confirmation and stop, or resume if the user changed
    /// their mind. Returns `None` when the workout goes on.
    async fn quit(&mut self) -> Result<Option<ControlExit>, QuitError> {
        let phase = self.query.query().await.context(SessionSnafu)?.phase;
        if !phase.is_active() {
            return Ok(Some(ControlExit::Abandoned));
        }

        if phase == Phase::Running {
            self.control.toggle().await.context(SessionSnafu)?;
        }

        self.prompt
            .write_all(QUIT_PROMPT.as_bytes())
            .await
            .context(WriteSnafu)
            .context(PromptSnafu)?;
        self.prompt
            .flush()
            .await
            .context(WriteSnafu)
            .context(PromptSnafu)?;

        let confirmed = self
            .lines
            .recv()
            .await
            .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"));

        if confirmed {
            self.control.stop().await.context(SessionSnafu)?;
            return Ok(Some(ControlExit::Stopped));
        }

        if phase == Phase::Running {
            self.control.toggle().await.context(SessionSnafu)?;
        }
        Ok(None)
    }
}

/// An error for reading controls from the terminal.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ControlError {
    #[snafu(display("Could not write to terminal"))]
    Write { source: IoError },
}

#[derive(Debug, Snafu)]
enum QuitError {
    Prompt { source: ControlError },
    Session { source: SendCommandError },
}
