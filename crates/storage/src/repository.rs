use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::broadcast;

use assess_core::model::{CourseId, LessonId};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// One durable "lesson completed" fact.
///
/// Completions are stored as an append-only event log per course and
/// replayed into a set on read, so two writers marking different lessons
/// at the same instant commute instead of racing on a shared map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub course_id: CourseId,
    pub lesson_id: LessonId,
    pub completed_at: DateTime<Utc>,
}

/// Buffer for the completion change feed. Slow subscribers that lag past
/// this many events miss some and should recompute from storage.
pub const FEED_CAPACITY: usize = 64;

/// Repository contract for lesson completion events.
#[async_trait]
pub trait LessonCompletionRepository: Send + Sync {
    /// Append one completion event. Appending an already-completed lesson
    /// is permitted; duplicates collapse in replay.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the event cannot be stored.
    async fn record_completion(&self, event: &CompletionEvent) -> Result<(), StorageError>;

    /// Replay the event log into the set of completed lessons for a course.
    ///
    /// A course with no recorded events yields an empty set, never an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for storage-level failures.
    async fn completed_lessons(&self, course_id: CourseId)
        -> Result<HashSet<LessonId>, StorageError>;

    /// Subscribe to completion events recorded through this repository.
    ///
    /// Every successful `record_completion` is broadcast to subscribers,
    /// which is how other component instances observing the same course
    /// refresh without a reload. Receivers filter by course themselves.
    fn subscribe(&self) -> broadcast::Receiver<CompletionEvent>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone)]
pub struct InMemoryRepository {
    events: Arc<Mutex<Vec<CompletionEvent>>>,
    feed: broadcast::Sender<CompletionEvent>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            feed,
        }
    }

    fn lock_events(&self) -> Result<std::sync::MutexGuard<'_, Vec<CompletionEvent>>, StorageError> {
        self.events
            .lock()
            .map_err(|_| StorageError::Connection("poisoned lock".into()))
    }
}

#[async_trait]
impl LessonCompletionRepository for InMemoryRepository {
    async fn record_completion(&self, event: &CompletionEvent) -> Result<(), StorageError> {
        self.lock_events()?.push(event.clone());
        // No receivers is fine; the event is durable either way.
        let _ = self.feed.send(event.clone());
        Ok(())
    }

    async fn completed_lessons(
        &self,
        course_id: CourseId,
    ) -> Result<HashSet<LessonId>, StorageError> {
        let events = self.lock_events()?;
        Ok(events
            .iter()
            .filter(|e| e.course_id == course_id)
            .map(|e| e.lesson_id)
            .collect())
    }

    fn subscribe(&self) -> broadcast::Receiver<CompletionEvent> {
        self.feed.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::time::fixed_now;

    fn event(course: u64, lesson: u64) -> CompletionEvent {
        CompletionEvent {
            course_id: CourseId::new(course),
            lesson_id: LessonId::new(lesson),
            completed_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn replay_is_scoped_per_course_and_deduplicated() {
        let repo = InMemoryRepository::new();
        repo.record_completion(&event(1, 10)).await.unwrap();
        repo.record_completion(&event(1, 10)).await.unwrap();
        repo.record_completion(&event(1, 11)).await.unwrap();
        repo.record_completion(&event(2, 99)).await.unwrap();

        let completed = repo.completed_lessons(CourseId::new(1)).await.unwrap();
        assert_eq!(completed.len(), 2);
        assert!(completed.contains(&LessonId::new(10)));
        assert!(completed.contains(&LessonId::new(11)));
    }

    #[tokio::test]
    async fn unknown_course_yields_empty_set() {
        let repo = InMemoryRepository::new();
        let completed = repo.completed_lessons(CourseId::new(7)).await.unwrap();
        assert!(completed.is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_recorded_events() {
        let repo = InMemoryRepository::new();
        let mut feed = repo.subscribe();
        repo.record_completion(&event(3, 30)).await.unwrap();

        let seen = feed.recv().await.unwrap();
        assert_eq!(seen.course_id, CourseId::new(3));
        assert_eq!(seen.lesson_id, LessonId::new(30));
    }
}
