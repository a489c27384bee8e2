#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    CompletionEvent, InMemoryRepository, LessonCompletionRepository, StorageError,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
