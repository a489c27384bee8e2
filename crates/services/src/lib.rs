#![forbid(unsafe_code)]

pub mod attempts;
pub mod dwell;
pub mod error;
pub mod execution;
pub mod grading;
pub mod practice;
pub mod progress_service;

pub use assess_core::Clock;

pub use error::{GraderError, ProgressError, QuizAttemptError};

pub use attempts::{
    AttemptPhase, AttemptProgress, AttemptState, GraderConfig, HttpQuizGrader,
    QuizAttemptController, QuizGrader, TickOutcome,
};
pub use dwell::{DWELL_THRESHOLD_SECONDS, DwellStatus, DwellTracker};
pub use execution::{ExecutionOutcome, Executor, SandboxClient, SandboxConfig};
pub use grading::GradingService;
pub use practice::{HttpPracticeGrader, PracticeGrader, PracticeSubmissionRecord};
pub use progress_service::{CompletionWatcher, ProgressService};
