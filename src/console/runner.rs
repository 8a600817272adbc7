use std::io::Write;

use snafu::prelude::*;
use tokio::io::AsyncWrite;
use tokio::task::JoinError;

use crate::console::input::{ControlError, ControlExit, Controller};
use crate::console::outbound::RenderFormat;
use crate::domain::engine::SessionOutcome;
use crate::domain::session::{SessionCompletion, WaitSessionError};

/// Writer for human readable notices such as the workout header. In JSON
/// mode stdout only carries events, so notices go to stderr.
pub fn notice_writer(format: RenderFormat) -> Box<dyn Write + Send> {
    match format {
        RenderFormat::Text => Box::new(std::io::stdout()),
        RenderFormat::Json => Box::new(std::io::stderr()),
    }
}

/// Writer for the quit prompt, following the same rule as
/// [`notice_writer`].
pub fn prompt_writer(format: RenderFormat) -> Box<dyn AsyncWrite + Unpin + Send> {
    match format {
        RenderFormat::Text => Box::new(tokio::io::stdout()),
        RenderFormat::Json => Box::new(tokio::io::stderr()),
    }
}

/// Feed controls to a session until it ends. Returns the session's outcome,
/// or `None` if the workout was abandoned before it produced one.
///
/// The controller owns the session's last handles, so once it stops reading
/// the session is closed instead of being left running.
///
/// # Errors
///
/// This function will return an error if the controls could not be read or
/// the session routine failed.
pub async fn drive<W>(
    controller: Controller<W>,
    completion: SessionCompletion,
) -> Result<Option<SessionOutcome>, DriveError>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut input = tokio::spawn(async move {
        let mut controller = controller;
        controller.run().await
    });

    let session = completion.wait();
    tokio::pin!(session);

    let res = tokio::select! {
        res = &mut session => res,
        exit = &mut input => {
            match exit.context(InputTaskSnafu)? {
                Ok(exit) => tracing::debug!(?exit, "Controls detached"),
                Err(err) => return Err(err).context(ControlSnafu),
            }
            session.await
        }
    };
    input.abort();

    res.context(SessionSnafu)
}

/// An error for driving a session from the terminal.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DriveError {
    #[snafu(display("Could not read controls"))]
    Control { source: ControlError },
    #[snafu(display("The control reader did not run to completion"))]
    InputTask { source: JoinError },
    #[snafu(display("Timer session failed"))]
    Session { source: WaitSessionError },
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use tokio::sync::mpsc::{self, Sender};
    use tokio::time::Duration;

    use crate::console::outbound::ConsoleObserver;
    use crate::domain::app::{ApplicationCore, WorkoutSelection};
    use crate::domain::entity::{TimerConfig, TimerVariant, WorkoutPlan};
    use crate::domain::outbound::SessionObserver;
    use crate::domain::repository::workout::MockWorkoutRepository;

    #[tokio::test(start_paused = true)]
    async fn quit_before_start_abandons() {
        let (sender, run) = launch(TimerVariant::ForTime, TimerConfig::default(), observer()).await;
        sender.send("q".to_owned()).await.unwrap();

        assert_eq!(run.await.unwrap().unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn natural_end_while_reading() {
        let (sender, run) = launch(TimerVariant::Emom, TimerConfig::emom(1, 2), observer()).await;
        sender.send(String::new()).await.unwrap();

        let outcome = run.await.unwrap().unwrap();
        assert_eq!(outcome, Some(SessionOutcome::Completed { result: 1 }));
        drop(sender);
    }

    #[tokio::test(start_paused = true)]
    async fn quit_confirmed_stops() {
        let (sender, run) = launch(TimerVariant::ForTime, TimerConfig::default(), observer()).await;
        sender.send(String::new()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5500)).await;
        sender.send("q".to_owned()).await.unwrap();
        sender.send("y".to_owned()).await.unwrap();

        assert_eq!(run.await.unwrap().unwrap(), Some(SessionOutcome::Stopped));
    }

    #[tokio::test(start_paused = true)]
    async fn input_end_closes_running_stopwatch() {
        let (sender, run) = launch(TimerVariant::ForTime, TimerConfig::default(), observer()).await;
        sender.send(String::new()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5500)).await;
        drop(sender);

        let outcome = tokio::time::timeout(Duration::from_secs(60), run)
            .await
            .expect("Session should close once input ends")
            .unwrap()
            .unwrap();
        assert_eq!(outcome, None);
    }

    #[tokio::test(start_paused = true)]
    async fn json_stream_carries_only_events() {
        let stream = SharedBuffer::default();
        let observer = Arc::new(ConsoleObserver::new(RenderFormat::Json, stream.clone()));
        let (sender, run) = launch(TimerVariant::Amrap, TimerConfig::amrap(30), observer).await;

        sender.send(String::new()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(7500)).await;
        sender.send("r".to_owned()).await.unwrap();
        sender.send("q".to_owned()).await.unwrap();
        sender.send("y".to_owned()).await.unwrap();
        assert_eq!(run.await.unwrap().unwrap(), Some(SessionOutcome::Stopped));

        let output = String::from_utf8(stream.0.lock().unwrap().clone()).unwrap();
        let mut lines = 0;
        for line in output.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("type").is_some(), "{line}");
            lines += 1;
        }
        assert!(lines > 5);
        assert!(output.contains("\"Finished\""));
    }

    async fn launch(
        variant: TimerVariant,
        config: TimerConfig,
        observer: Arc<dyn SessionObserver>,
    ) -> (
        Sender<String>,
        tokio::task::JoinHandle<Result<Option<SessionOutcome>, DriveError>>,
    ) {
        let plan = WorkoutPlan::new("test", variant, config);
        let core = ApplicationCore::setup(
            observer,
            Arc::new(MockWorkoutRepository::new()),
            WorkoutSelection::Adhoc(plan),
        )
        .await
        .unwrap();

        let (sender, lines) = mpsc::channel(4);
        let controller = Controller::new(lines, core.control, core.query, tokio::io::sink());
        let run = tokio::spawn(drive(controller, core.completion));
        (sender, run)
    }

    fn observer() -> Arc<dyn SessionObserver> {
        Arc::new(ConsoleObserver::new(RenderFormat::Text, std::io::sink()))
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
