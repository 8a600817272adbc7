use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::Level;
use wod_timer::domain::entity::{TimerConfig, TimerVariant};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Path to a custom configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Maximum logging level the subscriber should use
    #[arg(short, long, default_value_t = Level::WARN)]
    pub verbosity: Level,
    /// Print every session event as a JSON line
    #[arg(long)]
    pub json: bool,
    /// Don't show a desktop notification on completion
    #[arg(long)]
    pub no_notify: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the workouts in the catalog
    List,
    /// Run a workout from the catalog
    Run {
        /// Name of the workout
        name: String,
    },
    /// Run a workout configured on the command line
    Quick(QuickArguments),
}

#[derive(Debug, Args)]
pub struct QuickArguments {
    /// Timer kind: EMOM, AMRAP, ForTime or Tabata (HIIT)
    pub kind: TimerVariant,
    /// Number of rounds (EMOM, Tabata)
    #[arg(short, long)]
    pub rounds: Option<u64>,
    /// Seconds per round (EMOM)
    #[arg(short, long)]
    pub interval: Option<u64>,
    /// Total seconds (AMRAP)
    #[arg(short, long)]
    pub duration: Option<u64>,
    /// Seconds of work per round (Tabata)
    #[arg(short, long)]
    pub work: Option<u64>,
    /// Seconds of rest per round (Tabata)
    #[arg(long)]
    pub rest: Option<u64>,
    /// Time cap in seconds (ForTime)
    #[arg(long)]
    pub cap: Option<u64>,
}

impl From<&QuickArguments> for TimerConfig {
    fn from(value: &QuickArguments) -> Self {
        Self {
            rounds: value.rounds,
            interval_duration: value.interval,
            total_duration: value.duration,
            time_cap: value.cap,
            work_duration: value.work,
            rest_duration: value.rest,
        }
    }
}
