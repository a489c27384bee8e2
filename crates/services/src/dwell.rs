//! Dwell-time lesson completion.
//!
//! A lesson counts as read after 30 continuous seconds on it. The tracker
//! is created on entering a lesson and dropped on leaving. Dropping it
//! before the threshold elapses discards that visit's progress; the next
//! visit restarts from the full threshold.

use std::sync::Arc;

use assess_core::Clock;
use assess_core::model::{CourseId, LessonId};
use storage::repository::{CompletionEvent, LessonCompletionRepository};

use crate::error::ProgressError;

/// Seconds a learner must stay on a lesson before it is marked complete.
pub const DWELL_THRESHOLD_SECONDS: u32 = 30;

/// Where the tracker currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellStatus {
    /// Still counting down; seconds left until completion.
    Counting(u32),
    /// The lesson is complete (either from a previous visit or because
    /// this visit's countdown finished). Terminal.
    Completed,
}

/// Tick-driven countdown that marks a lesson complete after the dwell
/// threshold.
pub struct DwellTracker {
    clock: Clock,
    completions: Arc<dyn LessonCompletionRepository>,
    course_id: CourseId,
    lesson_id: LessonId,
    remaining: u32,
    completed: bool,
}

impl DwellTracker {
    /// Enter a lesson.
    ///
    /// If the lesson is already complete the countdown is skipped and the
    /// tracker starts in the terminal state. An unreadable completion log
    /// is treated as "not complete" and the countdown runs normally.
    pub async fn enter(
        clock: Clock,
        completions: Arc<dyn LessonCompletionRepository>,
        course_id: CourseId,
        lesson_id: LessonId,
    ) -> Self {
        let already_complete = match completions.completed_lessons(course_id).await {
            Ok(set) => set.contains(&lesson_id),
            Err(e) => {
                tracing::warn!(course_id = %course_id, error = %e, "completion log unreadable on lesson entry");
                false
            }
        };

        Self {
            clock,
            completions,
            course_id,
            lesson_id,
            remaining: DWELL_THRESHOLD_SECONDS,
            completed: already_complete,
        }
    }

    #[must_use]
    pub fn status(&self) -> DwellStatus {
        if self.completed {
            DwellStatus::Completed
        } else {
            DwellStatus::Counting(self.remaining)
        }
    }

    /// One viewing second. On reaching zero the completion event is
    /// appended and the tracker becomes terminal; further ticks are
    /// no-ops.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the completion event cannot be
    /// recorded; the countdown stays at zero so the next tick retries.
    pub async fn tick(&mut self) -> Result<DwellStatus, ProgressError> {
        if self.completed {
            return Ok(DwellStatus::Completed);
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return Ok(DwellStatus::Counting(self.remaining));
        }

        let event = CompletionEvent {
            course_id: self.course_id,
            lesson_id: self.lesson_id,
            completed_at: self.clock.now(),
        };
        self.completions.record_completion(&event).await?;
        tracing::info!(course_id = %self.course_id, lesson_id = %self.lesson_id, "lesson marked complete");
        self.completed = true;
        Ok(DwellStatus::Completed)
    }
}
