use std::sync::Arc;

use assess_core::Clock;
use assess_core::model::{OptionId, QuestionId, QuizDefinition, QuizError, QuizSubmissionRecord};

use super::grader::QuizGrader;
use super::state::AttemptState;
use crate::error::QuizAttemptError;

/// Lifecycle of one attempt as seen by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    InProgress,
    ResultShown,
}

/// Outcome of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Untimed attempt, halted countdown, or attempt no longer in
    /// progress.
    Idle,
    /// Countdown decremented; the new remaining value.
    Ticked(u32),
    /// The tick fired the automatic submission.
    AutoSubmitted,
}

/// Controller for one timed quiz attempt.
///
/// Owns the attempt state, the countdown, and the single grading request.
/// The host drives `tick` once per second while the attempt is in
/// progress and drops the controller on unmount, which tears everything
/// down; no timer outlives the attempt.
pub struct QuizAttemptController {
    clock: Clock,
    grader: Arc<dyn QuizGrader>,
    definition: QuizDefinition,
    state: AttemptState,
    record: Option<QuizSubmissionRecord>,
    /// Set when the countdown has fired its one automatic submission.
    /// A failed auto-submit leaves the attempt recoverable by a manual
    /// submit, but the countdown never fires again.
    auto_submit_fired: bool,
}

impl QuizAttemptController {
    /// Start a fresh attempt for a loaded quiz definition.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the definition is not answerable.
    pub fn start(
        clock: Clock,
        grader: Arc<dyn QuizGrader>,
        definition: QuizDefinition,
    ) -> Result<Self, QuizError> {
        let state = AttemptState::new(&definition, clock.now())?;
        Ok(Self {
            clock,
            grader,
            definition,
            state,
            record: None,
            auto_submit_fired: false,
        })
    }

    #[must_use]
    pub fn phase(&self) -> AttemptPhase {
        if self.record.is_some() {
            AttemptPhase::ResultShown
        } else {
            AttemptPhase::InProgress
        }
    }

    #[must_use]
    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    #[must_use]
    pub fn record(&self) -> Option<&QuizSubmissionRecord> {
        self.record.as_ref()
    }

    /// Toggle an option; see `AttemptState::toggle_option` for semantics.
    ///
    /// # Errors
    ///
    /// Returns `QuizAttemptError::AlreadySubmitted` once a result is
    /// shown, and unknown-id errors from the state.
    pub fn toggle_option(
        &mut self,
        question_id: QuestionId,
        option_id: OptionId,
    ) -> Result<(), QuizAttemptError> {
        if self.record.is_some() {
            return Err(QuizAttemptError::AlreadySubmitted);
        }
        self.state.toggle_option(question_id, option_id)
    }

    /// Jump to a question by index.
    ///
    /// # Errors
    ///
    /// Returns `QuizAttemptError::OutOfBounds` for an invalid index.
    pub fn go_to(&mut self, index: usize) -> Result<(), QuizAttemptError> {
        self.state.go_to(index)
    }

    pub fn next_question(&mut self) {
        self.state.next_question();
    }

    pub fn previous_question(&mut self) {
        self.state.previous_question();
    }

    /// One countdown second.
    ///
    /// The automatic submission fires at the tick where one second
    /// remains, before the countdown would hit zero, and fires at most
    /// once per attempt regardless of tick jitter. Ticks after submission
    /// or on an untimed quiz are no-ops.
    ///
    /// # Errors
    ///
    /// Returns `QuizAttemptError::Grader` if the fired auto-submission
    /// fails in transport; answers are preserved and a manual `submit`
    /// may retry.
    pub async fn tick(&mut self) -> Result<TickOutcome, QuizAttemptError> {
        if self.record.is_some() || self.auto_submit_fired {
            return Ok(TickOutcome::Idle);
        }
        let Some(remaining) = self.state.time_remaining() else {
            return Ok(TickOutcome::Idle);
        };

        if remaining <= 1 {
            self.auto_submit_fired = true;
            self.submit().await?;
            return Ok(TickOutcome::AutoSubmitted);
        }

        match self.state.tick_countdown() {
            Some(left) => Ok(TickOutcome::Ticked(left)),
            None => Ok(TickOutcome::Idle),
        }
    }

    /// Submit the attempt for grading.
    ///
    /// On transport failure the attempt stays in progress with all
    /// answers intact, so the learner can retry the submit action.
    ///
    /// # Errors
    ///
    /// Returns `QuizAttemptError::AlreadySubmitted` for a second submit,
    /// or `QuizAttemptError::Grader` on collaborator failure.
    pub async fn submit(&mut self) -> Result<&QuizSubmissionRecord, QuizAttemptError> {
        if self.record.is_some() {
            return Err(QuizAttemptError::AlreadySubmitted);
        }

        let payload = self.state.answers_payload();
        let result = self
            .grader
            .submit_quiz(self.state.quiz_id(), &payload, self.state.started_at())
            .await;

        match result {
            Ok(record) => {
                tracing::info!(
                    quiz_id = %self.state.quiz_id(),
                    attempt_id = %self.state.attempt_id(),
                    passed = record.passed,
                    "quiz attempt graded"
                );
                self.state.mark_submitted();
                Ok(&*self.record.insert(record))
            }
            Err(e) => {
                tracing::warn!(
                    quiz_id = %self.state.quiz_id(),
                    attempt_id = %self.state.attempt_id(),
                    error = %e,
                    "quiz submission failed; attempt preserved"
                );
                Err(QuizAttemptError::Grader(e))
            }
        }
    }

    /// Discard the current attempt and start over with cleared answers
    /// and a freshly initialized countdown.
    ///
    /// Retake is offered unconditionally here; whether another attempt is
    /// allowed is enforced by the grading collaborator on submit.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the stored definition fails validation,
    /// which cannot happen for a definition that started once.
    pub fn retry(&mut self) -> Result<(), QuizError> {
        self.state = AttemptState::new(&self.definition, self.clock.now())?;
        self.record = None;
        self.auto_submit_fired = false;
        Ok(())
    }
}
