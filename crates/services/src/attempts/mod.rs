mod controller;
mod grader;
mod state;
mod view;

// Public API of the attempt subsystem.
pub use crate::error::QuizAttemptError;
pub use controller::{AttemptPhase, QuizAttemptController, TickOutcome};
pub use grader::{GraderConfig, HttpQuizGrader, QuizGrader};
pub use state::AttemptState;
pub use view::AttemptProgress;
