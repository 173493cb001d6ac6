use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::{StoreError, StoreResult, TodoStore};
use crate::model::{Todo, TodoId};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS todo (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    done BOOLEAN NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
)";

/// Relational store backed by a single SQLite `todo` table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open `url` (e.g. `sqlite://todo.db` or `sqlite::memory:`) and make
    /// sure the `todo` table exists.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Each in-memory connection is its own database; keep exactly one
        // connection alive for the lifetime of the pool.
        let pool_options = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self::from_pool(pool).await?;
        info!(url, "sqlite store ready");
        Ok(store)
    }

    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }
}

impl TodoStore for SqliteStore {
    async fn find_all(&self) -> StoreResult<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, text, done, created_at FROM todo ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn find_by_id(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, text, done, created_at FROM todo WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn save(&self, todo: Todo) -> StoreResult<Todo> {
        if todo.is_new() {
            let saved = sqlx::query_as::<_, Todo>(
                "INSERT INTO todo (text, done, created_at) VALUES (?, ?, ?)
                 RETURNING id, text, done, created_at",
            )
            .bind(&todo.text)
            .bind(todo.done)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
            debug!(id = saved.id, "inserted todo");
            return Ok(saved);
        }

        let saved = sqlx::query_as::<_, Todo>(
            "UPDATE todo SET text = ?, done = ? WHERE id = ?
             RETURNING id, text, done, created_at",
        )
        .bind(&todo.text)
        .bind(todo.done)
        .bind(todo.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(todo.id))?;
        debug!(id = saved.id, "updated todo");
        Ok(saved)
    }

    async fn delete_by_id(&self, id: TodoId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn insert_then_find_by_id() {
        let store = store().await;
        let saved = store.save(Todo::draft("Buy milk", false)).await.unwrap();
        assert!(saved.id > 0);

        let found = store.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn update_writes_only_text_and_done() {
        let store = store().await;
        let saved = store.save(Todo::draft("a", false)).await.unwrap();
        let changed = Todo {
            text: "b".to_string(),
            done: true,
            created_at: Utc::now() + chrono::Duration::days(3),
            ..saved.clone()
        };

        let updated = store.save(changed).await.unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.text, "b");
        assert!(updated.done);
        assert_eq!(updated.created_at, saved.created_at);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found() {
        let store = store().await;
        let ghost = Todo {
            id: 404,
            ..Todo::draft("ghost", false)
        };
        assert!(matches!(
            store.save(ghost).await.unwrap_err(),
            StoreError::NotFound(404)
        ));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = store().await;
        let saved = store.save(Todo::draft("a", false)).await.unwrap();
        assert!(store.delete_by_id(saved.id).await.unwrap());
        assert!(!store.delete_by_id(saved.id).await.unwrap());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_all_returns_every_live_record() {
        let store = store().await;
        let a = store.save(Todo::draft("a", false)).await.unwrap();
        let b = store.save(Todo::draft("b", true)).await.unwrap();
        let c = store.save(Todo::draft("c", false)).await.unwrap();
        store.delete_by_id(b.id).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![a, c]);
    }
}
