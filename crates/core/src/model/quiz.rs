use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{OptionId, QuestionId, QuizId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("question {0} has no options")]
    NoOptions(QuestionId),
}

/// How many options a learner may select on a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Single,
    Multiple,
}

/// One selectable answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: OptionId,
    pub text: String,
    /// Correctness as delivered by the current backend. Held only for the
    /// lifetime of the loaded question and never re-exposed by this engine;
    /// the UI must not surface it before grading.
    pub is_correct: bool,
}

/// One quiz question with its options and point weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<QuizOption>,
    pub points: f64,
    /// Server-supplied selection mode. Absent with the current backend, in
    /// which case the mode is derived from the correctness flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_mode: Option<SelectionMode>,
}

impl QuizQuestion {
    /// Effective selection mode for this question.
    ///
    /// Prefers the server-supplied mode. Without one, a question with more
    /// than one option flagged correct is multi-select, matching the
    /// behavior of the existing backend.
    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        if let Some(mode) = self.selection_mode {
            return mode;
        }
        let correct = self.options.iter().filter(|o| o.is_correct).count();
        if correct > 1 {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }

    #[must_use]
    pub fn has_option(&self, option_id: OptionId) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }
}

/// Quiz definition as loaded from the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub id: QuizId,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
    /// Time limit in minutes; `None` means untimed.
    pub time_limit_minutes: Option<u32>,
}

impl QuizDefinition {
    /// Validate that the quiz is answerable.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` for a quiz without questions and
    /// `QuizError::NoOptions` for a question without options.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::Empty);
        }
        for question in &self.questions {
            if question.options.is_empty() {
                return Err(QuizError::NoOptions(question.id));
            }
        }
        Ok(())
    }

    /// Countdown seconds for a fresh attempt, if the quiz is timed.
    ///
    /// Saturates instead of overflowing on absurd limits.
    #[must_use]
    pub fn time_limit_seconds(&self) -> Option<u32> {
        self.time_limit_minutes.map(|m| m.saturating_mul(60))
    }
}

/// One answered question on the submission wire.
///
/// Carries every selected option, not just the first one; the grading
/// collaborator accepts the full selection set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: QuestionId,
    pub selected_option_ids: Vec<OptionId>,
}

/// Per-question outcome inside a graded submission record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    pub correct: bool,
    pub points_awarded: f64,
}

/// Fully-graded submission returned by the quiz grading collaborator.
///
/// The collaborator is the sole authority on scoring, pass threshold and
/// attempt bookkeeping; this engine never recomputes any of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSubmissionRecord {
    pub quiz_id: QuizId,
    pub score: f64,
    pub total_points: f64,
    pub percentage: f64,
    pub passed: bool,
    pub question_outcomes: Vec<QuestionOutcome>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: u64, is_correct: bool) -> QuizOption {
        QuizOption {
            id: OptionId::new(id),
            text: format!("option {id}"),
            is_correct,
        }
    }

    fn question(options: Vec<QuizOption>) -> QuizQuestion {
        QuizQuestion {
            id: QuestionId::new(1),
            text: "Q".into(),
            options,
            points: 2.0,
            selection_mode: None,
        }
    }

    #[test]
    fn single_correct_option_means_single_select() {
        let q = question(vec![option(1, true), option(2, false)]);
        assert_eq!(q.selection_mode(), SelectionMode::Single);
    }

    #[test]
    fn multiple_correct_options_mean_multi_select() {
        let q = question(vec![option(1, true), option(2, true), option(3, false)]);
        assert_eq!(q.selection_mode(), SelectionMode::Multiple);
    }

    #[test]
    fn server_mode_overrides_derivation() {
        let mut q = question(vec![option(1, true), option(2, false)]);
        q.selection_mode = Some(SelectionMode::Multiple);
        assert_eq!(q.selection_mode(), SelectionMode::Multiple);
    }

    #[test]
    fn validate_rejects_empty_quiz_and_optionless_question() {
        let quiz = QuizDefinition {
            id: QuizId::new(1),
            title: "T".into(),
            questions: Vec::new(),
            time_limit_minutes: None,
        };
        assert!(matches!(quiz.validate(), Err(QuizError::Empty)));

        let quiz = QuizDefinition {
            id: QuizId::new(1),
            title: "T".into(),
            questions: vec![question(Vec::new())],
            time_limit_minutes: None,
        };
        assert!(matches!(quiz.validate(), Err(QuizError::NoOptions(_))));
    }

    #[test]
    fn time_limit_converts_to_seconds() {
        let quiz = QuizDefinition {
            id: QuizId::new(1),
            title: "T".into(),
            questions: vec![question(vec![option(1, true)])],
            time_limit_minutes: Some(2),
        };
        assert_eq!(quiz.time_limit_seconds(), Some(120));
    }

    #[test]
    fn extreme_time_limit_saturates_instead_of_overflowing() {
        let quiz = QuizDefinition {
            id: QuizId::new(1),
            title: "T".into(),
            questions: vec![question(vec![option(1, true)])],
            time_limit_minutes: Some(u32::MAX),
        };
        assert_eq!(quiz.time_limit_seconds(), Some(u32::MAX));
    }
}
