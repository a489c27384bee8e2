use assess_core::model::{CourseId, LessonId};
use assess_core::time::fixed_now;
use storage::repository::{CompletionEvent, LessonCompletionRepository};
use storage::sqlite::SqliteRepository;

fn event(course: u64, lesson: u64) -> CompletionEvent {
    CompletionEvent {
        course_id: CourseId::new(course),
        lesson_id: LessonId::new(lesson),
        completed_at: fixed_now(),
    }
}

#[tokio::test]
async fn append_and_replay_round_trip() {
    let repo = SqliteRepository::open("sqlite:file:memdb_roundtrip?mode=memory&cache=shared").await.unwrap();

    repo.record_completion(&event(1, 10)).await.unwrap();
    repo.record_completion(&event(1, 11)).await.unwrap();
    repo.record_completion(&event(2, 20)).await.unwrap();

    let completed = repo.completed_lessons(CourseId::new(1)).await.unwrap();
    assert_eq!(completed.len(), 2);
    assert!(completed.contains(&LessonId::new(10)));
    assert!(completed.contains(&LessonId::new(11)));
    assert!(!completed.contains(&LessonId::new(20)));
}

#[tokio::test]
async fn duplicate_events_collapse_in_replay() {
    let repo = SqliteRepository::open("sqlite:file:memdb_dedupe?mode=memory&cache=shared").await.unwrap();

    repo.record_completion(&event(1, 10)).await.unwrap();
    repo.record_completion(&event(1, 10)).await.unwrap();

    let completed = repo.completed_lessons(CourseId::new(1)).await.unwrap();
    assert_eq!(completed.len(), 1);
}

#[tokio::test]
async fn empty_course_reads_as_empty_set() {
    let repo = SqliteRepository::open("sqlite:file:memdb_empty?mode=memory&cache=shared").await.unwrap();
    let completed = repo.completed_lessons(CourseId::new(42)).await.unwrap();
    assert!(completed.is_empty());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::open("sqlite:file:memdb_idempotent?mode=memory&cache=shared").await.unwrap();
    repo.migrate().await.unwrap();
    repo.record_completion(&event(1, 1)).await.unwrap();
    assert_eq!(repo.completed_lessons(CourseId::new(1)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn recorded_events_reach_subscribers() {
    let repo = SqliteRepository::open("sqlite:file:memdb_feed?mode=memory&cache=shared").await.unwrap();
    let mut feed = repo.subscribe();

    repo.record_completion(&event(5, 50)).await.unwrap();

    let seen = feed.recv().await.unwrap();
    assert_eq!(seen.course_id, CourseId::new(5));
    assert_eq!(seen.lesson_id, LessonId::new(50));
}
