pub mod config;
pub mod input;
pub mod outbound;
pub mod repository;
pub mod runner;

pub use input::{stdin_lines, ControlExit, Controller};
pub use outbound::{CelebrationNotifier, ConsoleObserver, ObserverGroup, RenderFormat};
pub use repository::WorkoutConfiguration;
pub use runner::{drive, notice_writer, prompt_writer, DriveError};
