use chrono::{DateTime, Utc};
use uuid::Uuid;

use assess_core::model::{
    OptionId, QuestionId, QuizAnswer, QuizDefinition, QuizError, QuizId, QuizQuestion,
    SelectionMode,
};

use crate::error::QuizAttemptError;

/// One answer slot per question, holding the learner's selection in the
/// order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AnswerSlot {
    question_id: QuestionId,
    selected: Vec<OptionId>,
}

/// In-memory state of one quiz attempt.
///
/// Created when a quiz view mounts, mutated by option toggles, navigation
/// and timer ticks, and replaced wholesale on retake. Holds the loaded
/// questions so toggle semantics can consult each question's selection
/// mode.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptState {
    attempt_id: Uuid,
    quiz_id: QuizId,
    questions: Vec<QuizQuestion>,
    answers: Vec<AnswerSlot>,
    current_index: usize,
    time_remaining: Option<u32>,
    started_at: DateTime<Utc>,
    submitted: bool,
}

impl AttemptState {
    /// Build a fresh attempt from a quiz definition.
    ///
    /// Every question gets an empty answer slot; a timed quiz starts its
    /// countdown at the full limit.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the definition is not answerable.
    pub fn new(definition: &QuizDefinition, started_at: DateTime<Utc>) -> Result<Self, QuizError> {
        definition.validate()?;

        let answers = definition
            .questions
            .iter()
            .map(|q| AnswerSlot {
                question_id: q.id,
                selected: Vec::new(),
            })
            .collect();

        Ok(Self {
            attempt_id: Uuid::new_v4(),
            quiz_id: definition.id,
            questions: definition.questions.clone(),
            answers,
            current_index: 0,
            time_remaining: definition.time_limit_seconds(),
            started_at,
            submitted: false,
        })
    }

    #[must_use]
    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> &QuizQuestion {
        // One slot per question and the index is bounds-checked on every
        // move, so this cannot be out of range.
        &self.questions[self.current_index]
    }

    /// Selected options for a question, in selection order.
    #[must_use]
    pub fn selected(&self, question_id: QuestionId) -> &[OptionId] {
        self.answers
            .iter()
            .find(|slot| slot.question_id == question_id)
            .map_or(&[], |slot| slot.selected.as_slice())
    }

    /// Number of questions with at least one selected option.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|slot| !slot.selected.is_empty())
            .count()
    }

    /// Per-question answered flags, in question order.
    #[must_use]
    pub fn answered_flags(&self) -> Vec<bool> {
        self.answers
            .iter()
            .map(|slot| !slot.selected.is_empty())
            .collect()
    }

    /// Toggle option `option_id` on question `question_id`.
    ///
    /// Multi-select questions toggle membership; single-select questions
    /// replace the whole selection with the toggled option.
    ///
    /// # Errors
    ///
    /// Returns `QuizAttemptError::AlreadySubmitted` after submission, and
    /// unknown-question/unknown-option errors for ids that do not belong
    /// to this quiz.
    pub fn toggle_option(
        &mut self,
        question_id: QuestionId,
        option_id: OptionId,
    ) -> Result<(), QuizAttemptError> {
        if self.submitted {
            return Err(QuizAttemptError::AlreadySubmitted);
        }

        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or(QuizAttemptError::UnknownQuestion(question_id))?;
        if !question.has_option(option_id) {
            return Err(QuizAttemptError::UnknownOption(option_id));
        }
        let mode = question.selection_mode();

        let slot = self
            .answers
            .iter_mut()
            .find(|slot| slot.question_id == question_id)
            .ok_or(QuizAttemptError::UnknownQuestion(question_id))?;

        match mode {
            SelectionMode::Multiple => {
                if let Some(pos) = slot.selected.iter().position(|id| *id == option_id) {
                    slot.selected.remove(pos);
                } else {
                    slot.selected.push(option_id);
                }
            }
            SelectionMode::Single => {
                slot.selected.clear();
                slot.selected.push(option_id);
            }
        }
        Ok(())
    }

    /// Jump to a question by index.
    ///
    /// # Errors
    ///
    /// Returns `QuizAttemptError::OutOfBounds` for an index past the last
    /// question.
    pub fn go_to(&mut self, index: usize) -> Result<(), QuizAttemptError> {
        if index >= self.questions.len() {
            return Err(QuizAttemptError::OutOfBounds {
                index,
                len: self.questions.len(),
            });
        }
        self.current_index = index;
        Ok(())
    }

    /// Move to the next question; saturates at the last one.
    pub fn next_question(&mut self) {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        }
    }

    /// Move to the previous question; saturates at the first one.
    pub fn previous_question(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// One countdown tick. Returns the new remaining value, or `None` for
    /// an untimed attempt. Saturates at zero.
    pub(crate) fn tick_countdown(&mut self) -> Option<u32> {
        if let Some(remaining) = self.time_remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
            return Some(*remaining);
        }
        None
    }

    pub(crate) fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    /// Submission payload: one entry per question, carrying every selected
    /// option id (empty for unanswered questions).
    #[must_use]
    pub fn answers_payload(&self) -> Vec<QuizAnswer> {
        self.answers
            .iter()
            .map(|slot| QuizAnswer {
                question_id: slot.question_id,
                selected_option_ids: slot.selected.clone(),
            })
            .collect()
    }
}
