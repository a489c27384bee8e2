//! Shared error types for the services crate.

use thiserror::Error;

use assess_core::model::{OptionId, QuestionId, QuizError};
use storage::repository::StorageError;

/// Errors emitted by the grading collaborator clients (quiz and practice).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraderError {
    #[error("grading service returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `QuizAttemptController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizAttemptError {
    #[error("attempt already submitted")]
    AlreadySubmitted,
    #[error("unknown question {0}")]
    UnknownQuestion(QuestionId),
    #[error("question has no option {0}")]
    UnknownOption(OptionId),
    #[error("question index {index} out of bounds for {len} questions")]
    OutOfBounds { index: usize, len: usize },
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Grader(#[from] GraderError),
}

/// Errors emitted by progress and dwell services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
