//! Persistence boundary for todo records.
//!
//! # Design
//! The handlers only see `TodoStore`; the concrete backend is chosen once at
//! startup. A backend owns id assignment and `created_at`, and an update
//! writes nothing but `text` and `done`.

use std::future::Future;

use crate::model::{Todo, TodoId};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An update addressed an id that is not stored.
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

pub trait TodoStore: Send + Sync + 'static {
    /// All stored todos, ordered by id.
    fn find_all(&self) -> impl Future<Output = StoreResult<Vec<Todo>>> + Send;

    /// `Ok(None)` when no todo has this id.
    fn find_by_id(&self, id: TodoId) -> impl Future<Output = StoreResult<Option<Todo>>> + Send;

    /// Insert when `todo.id == 0`, otherwise overwrite `text` and `done` of
    /// the stored record.
    fn save(&self, todo: Todo) -> impl Future<Output = StoreResult<Todo>> + Send;

    /// Returns whether a record was removed. Absence is not an error.
    fn delete_by_id(&self, id: TodoId) -> impl Future<Output = StoreResult<bool>> + Send;
}
