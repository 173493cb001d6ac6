use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{StoreError, StoreResult, TodoStore};
use crate::model::{Todo, TodoId};

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: TodoId,
    todos: BTreeMap<TodoId, Todo>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoStore for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Todo>> {
        let inner = self.inner.read().await;
        Ok(inner.todos.values().cloned().collect())
    }

    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        let inner = self.inner.read().await;
        Ok(inner.todos.get(&id).cloned())
    }

    async fn save(&self, todo: Todo) -> StoreResult<Todo> {
        let mut inner = self.inner.write().await;
        if todo.is_new() {
            inner.last_id += 1;
            let saved = Todo {
                id: inner.last_id,
                created_at: Utc::now(),
                ..todo
            };
            inner.todos.insert(saved.id, saved.clone());
            debug!(id = saved.id, "inserted todo");
            return Ok(saved);
        }

        let stored = inner
            .todos
            .get_mut(&todo.id)
            .ok_or(StoreError::NotFound(todo.id))?;
        stored.text = todo.text;
        stored.done = todo.done;
        debug!(id = stored.id, "updated todo");
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: TodoId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.todos.remove(&id).is_some())
    }
}
