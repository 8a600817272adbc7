pub mod workout;

pub use workout::{GetWorkoutError, WorkoutRepository};
