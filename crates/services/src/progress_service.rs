//! Repository-backed hybrid progress aggregation.

use std::sync::Arc;

use tokio::sync::broadcast;

use assess_core::model::CourseId;
use assess_core::progress::{ProgressReport, ProgressSnapshot, compute_percent};
use storage::repository::{CompletionEvent, LessonCompletionRepository};

/// Computes the course progress percentage from local lesson completions
/// and optional server-supplied signals.
///
/// One instance is scoped to one course; classroom views create it on
/// render and recompute whenever the completion watcher fires.
#[derive(Clone)]
pub struct ProgressService {
    course_id: CourseId,
    completions: Arc<dyn LessonCompletionRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(course_id: CourseId, completions: Arc<dyn LessonCompletionRepository>) -> Self {
        Self {
            course_id,
            completions,
        }
    }

    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    /// Build the progress report for this course.
    ///
    /// An unreadable completion log degrades to an empty set. Missing
    /// local data is never an error, it just means no lessons completed
    /// on this device yet.
    pub async fn report(
        &self,
        total_lessons: u32,
        initial_percent: Option<u32>,
        snapshot: Option<&ProgressSnapshot>,
    ) -> ProgressReport {
        let completed = match self.completions.completed_lessons(self.course_id).await {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(course_id = %self.course_id, error = %e, "completion log unreadable, treating as empty");
                Default::default()
            }
        };
        let completed_lessons = u32::try_from(completed.len()).unwrap_or(u32::MAX);
        compute_percent(completed_lessons, total_lessons, initial_percent, snapshot)
    }

    /// Watch for lesson completions on this course recorded by any other
    /// component instance sharing the repository.
    #[must_use]
    pub fn watch(&self) -> CompletionWatcher {
        CompletionWatcher {
            course_id: self.course_id,
            feed: self.completions.subscribe(),
        }
    }
}

/// Receiver half of the cross-instance refresh mechanism, filtered to one
/// course.
pub struct CompletionWatcher {
    course_id: CourseId,
    feed: broadcast::Receiver<CompletionEvent>,
}

impl CompletionWatcher {
    /// Wait until this course's completion set may have changed.
    ///
    /// Returns `false` when the feed is closed (repository dropped). A
    /// lagged receiver also reports a change: events were missed, so the
    /// caller should recompute from storage either way.
    pub async fn changed(&mut self) -> bool {
        loop {
            match self.feed.recv().await {
                Ok(event) if event.course_id == self.course_id => return true,
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => return true,
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }
}
