use std::collections::HashSet;

use sqlx::Row;

use assess_core::model::{CourseId, LessonId};

use super::SqliteRepository;
use super::mapping::{id_i64, lesson_id_from_i64};
use crate::repository::{CompletionEvent, LessonCompletionRepository, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl LessonCompletionRepository for SqliteRepository {
    async fn record_completion(&self, event: &CompletionEvent) -> Result<(), StorageError> {
        let course_id = id_i64("course_id", event.course_id.value())?;
        let lesson_id = id_i64("lesson_id", event.lesson_id.value())?;

        sqlx::query(
            r"
                INSERT INTO lesson_completion_events (course_id, lesson_id, completed_at)
                VALUES (?1, ?2, ?3)
            ",
        )
        .bind(course_id)
        .bind(lesson_id)
        .bind(event.completed_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        let _ = self.feed.send(event.clone());
        Ok(())
    }

    async fn completed_lessons(
        &self,
        course_id: CourseId,
    ) -> Result<HashSet<LessonId>, StorageError> {
        let course_id = id_i64("course_id", course_id.value())?;

        let rows = sqlx::query(
            r"
                SELECT DISTINCT lesson_id
                FROM lesson_completion_events
                WHERE course_id = ?1
            ",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut lessons = HashSet::with_capacity(rows.len());
        for row in &rows {
            let raw: i64 = row.try_get("lesson_id").map_err(conn)?;
            lessons.insert(lesson_id_from_i64(raw)?);
        }
        Ok(lessons)
    }

    fn subscribe(&self) -> tokio::sync::broadcast::Receiver<CompletionEvent> {
        self.feed.subscribe()
    }
}
