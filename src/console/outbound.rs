use std::io::{Stdout, Write};
use std::sync::{Arc, Mutex};

use notify_rust::Notification;
use snafu::prelude::*;

use crate::domain::engine::{SessionOutcome, TimerEvent, TimerSnapshot};
use crate::domain::entity::{format_clock, TimerVariant};
use crate::domain::outbound::{ObserveError, SessionEvent, SessionObserver};
use crate::tracing_report;

pub const MOTIVATIONAL_MESSAGES: [&str; 20] = [
    "Amazing work!",
    "You crushed it!",
    "Beast mode activated!",
    "You're a machine!",
    "Better here than the couch!",
    "Better sore than sorry!",
    "Stronger than yesterday!",
    "Progress over perfection!",
    "Legendary performance!",
    "You're an inspiration!",
    "Earned it!",
    "Sweat is success!",
    "Own your power!",
    "Champion mentality!",
    "Mission accomplished!",
    "Victory is yours!",
    "Dedication pays off!",
    "You showed up!",
    "Boom! Nailed it!",
    "Level up!",
];

/// Pick a motivational message for a result. The same result always gets
/// the same message.
pub fn motivational_message(result: u64) -> &'static str {
    let index = (result % MOTIVATIONAL_MESSAGES.len() as u64) as usize;
    MOTIVATIONAL_MESSAGES[index]
}

/// Describe a completed workout's result in words.
pub fn describe_result(snapshot: &TimerSnapshot, result: u64) -> String {
    match snapshot.variant {
        TimerVariant::ForTime => format!("Finished in {}", format_clock(result)),
        TimerVariant::Amrap if !snapshot.laps.is_empty() => format!(
            "{result} rounds, {} per round on average",
            format_clock(snapshot.average_lap)
        ),
        _ => format!("{result} rounds"),
    }
}

/// How the terminal renders session events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Text,
    Json,
}

/// A [`SessionObserver`] which renders every event as one line on a
/// terminal.
pub struct ConsoleObserver<W> {
    format: RenderFormat,
    writer: Mutex<W>,
}

impl ConsoleObserver<Stdout> {
    /// Creates a new [`ConsoleObserver`] writing to stdout.
    pub fn stdout(format: RenderFormat) -> Self {
        Self::new(format, std::io::stdout())
    }
}

impl<W> ConsoleObserver<W> {
    /// Creates a new [`ConsoleObserver`].
    pub fn new(format: RenderFormat, writer: W) -> Self {
        Self {
            format,
            writer: Mutex::new(writer),
        }
    }

    fn render(&self, event: &SessionEvent) -> Result<Option<String>, ObserveError> {
        match self.format {
            RenderFormat::Json => {
                let line = whatever!(serde_json::to_string(event), "Could not serialize event");
                Ok(Some(line))
            }
            RenderFormat::Text => Ok(render_text(event)),
        }
    }
}

fn render_text(event: &SessionEvent) -> Option<String> {
    let line = match event {
        SessionEvent::Timer(TimerEvent::CountdownPulse { step }) => format!("{step}"),
        SessionEvent::Timer(TimerEvent::CountdownFinished) => return None,
        SessionEvent::Timer(TimerEvent::RoundStarted { round }) => format!("-- Round {round} --"),
        SessionEvent::Timer(TimerEvent::RestStarted { round }) => format!("-- Rest after round {round} --"),
        SessionEvent::Timer(TimerEvent::RoundMarked { rounds, lap }) => {
            format!("Round {rounds} done in {}", format_clock(*lap))
        }
        SessionEvent::Timer(TimerEvent::Paused) => "PAUSED (press enter to resume)".to_owned(),
        SessionEvent::Timer(TimerEvent::Resumed) => "Resumed".to_owned(),
        SessionEvent::Tick(snapshot) => render_tick(snapshot),
        SessionEvent::Finished {
            outcome: SessionOutcome::Completed { result },
            snapshot,
        } => format!("Workout complete! {}", describe_result(snapshot, *result)),
        SessionEvent::Finished {
            outcome: SessionOutcome::Stopped,
            ..
        } => "Workout stopped".to_owned(),
    };
    Some(line)
}

fn render_tick(snapshot: &TimerSnapshot) -> String {
    let mut line = format!(
        "{:>6}  {:<18} {:>3.0}%",
        snapshot.display, snapshot.label, snapshot.progress
    );
    if let Some(caption) = snapshot.round_caption() {
        line.push_str("  ");
        line.push_str(&caption);
    }
    if snapshot.variant == TimerVariant::Amrap {
        line.push_str(&format!("  Rounds: {}", snapshot.laps.len()));
    }
    line
}

#[async_trait::async_trait]
impl<W: Write + Send + 'static> SessionObserver for ConsoleObserver<W> {
    async fn observe(&self, event: &SessionEvent) -> Result<(), ObserveError> {
        let Some(line) = self.render(event)? else {
            return Ok(());
        };

        let Ok(mut writer) = self.writer.lock() else {
            whatever!("Terminal writer is poisoned");
        };
        whatever!(writeln!(writer, "{line}"), "Could not write to terminal");
        whatever!(writer.flush(), "Could not flush terminal");
        Ok(())
    }
}

/// A [`SessionObserver`] which shows a desktop notification when a workout
/// is completed.
#[derive(Debug, Clone)]
pub struct CelebrationNotifier {
    app_name: String,
}

impl CelebrationNotifier {
    /// Creates a new [`CelebrationNotifier`].
    pub fn new(app_name: String) -> Self {
        Self { app_name }
    }
}

#[async_trait::async_trait]
impl SessionObserver for CelebrationNotifier {
    async fn observe(&self, event: &SessionEvent) -> Result<(), ObserveError> {
        let SessionEvent::Finished {
            outcome: SessionOutcome::Completed { result },
            snapshot,
        } = event
        else {
            return Ok(());
        };

        let body = format!(
            "{}\n{}",
            describe_result(snapshot, *result),
            motivational_message(*result)
        );

        let mut notification = Notification::new();
        notification.appname(&self.app_name);
        notification.summary("Workout complete!");
        notification.body(&body);

        let _ = whatever!(
            notification.show_async().await,
            "Could not show notification",
        );

        Ok(())
    }
}

/// Fans every event out to several observers in order. A failing observer
/// is logged here and doesn't keep the others from seeing the event, so the
/// group itself never fails.
#[derive(Default)]
pub struct ObserverGroup {
    observers: Vec<Arc<dyn SessionObserver>>,
}

impl ObserverGroup {
    /// Creates a new empty [`ObserverGroup`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer.
    pub fn with(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

#[async_trait::async_trait]
impl SessionObserver for ObserverGroup {
    async fn observe(&self, event: &SessionEvent) -> Result<(), ObserveError> {
        for observer in &self.observers {
            if let Err(err) = observer.observe(event).await {
                tracing_report!(err, "Observer failed");
            }
        }
        Ok(())
    }
}
