use super::controller::{AttemptPhase, QuizAttemptController};

/// Presentation-agnostic snapshot of attempt progress.
///
/// This is intentionally **not** a UI view-model: no pre-formatted
/// strings, no localization assumptions. The front end formats the
/// remaining seconds and renders the per-question flags however it likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptProgress {
    pub phase: AttemptPhase,
    pub total_questions: usize,
    pub answered: usize,
    pub answered_flags: Vec<bool>,
    pub current_index: usize,
    pub time_remaining: Option<u32>,
}

impl AttemptProgress {
    #[must_use]
    pub fn from_controller(controller: &QuizAttemptController) -> Self {
        let state = controller.state();
        Self {
            phase: controller.phase(),
            total_questions: state.question_count(),
            answered: state.answered_count(),
            answered_flags: state.answered_flags(),
            current_index: state.current_index(),
            time_remaining: state.time_remaining(),
        }
    }
}
