pub mod config;
pub mod countdown;
pub mod lap;
pub mod phase;
pub mod plan;
pub mod positive;
pub mod progress;
pub mod variant;

pub use config::TimerConfig;
pub use countdown::{Countdown, CountdownAdvance, CountdownStep};
pub use lap::RoundMarkers;
pub use phase::Phase;
pub use plan::WorkoutPlan;
pub use positive::{Positive, TryNewPositiveError};
pub use progress::{format_clock, Direction, Progress};
pub use variant::{ParseTimerVariantError, TimerVariant};
