//! HTTP service for a single-table to-do list.
//!
//! # Overview
//! `app` mounts five operations under `/todo` on top of any `TodoStore`.
//! Two stores ship with the crate: `MemoryStore` for tests and throwaway
//! runs, and `SqliteStore` for durable storage.
//!
//! # Design
//! - Handlers are stateless; the store is the single source of truth.
//! - Store errors distinguish `NotFound` from storage failures so the
//!   handlers can answer 404 vs 500.
//! - The binary wires configuration, logging and graceful shutdown; the
//!   library stays free of process-level concerns.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
pub use model::{NewTodo, Todo, TodoId, UpdateTodo};
pub use store::{MemoryStore, SqliteStore, StoreError, StoreResult, TodoStore};

use handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};

/// Build the `/todo` router around `store`.
pub fn app<S: TodoStore>(store: S) -> Router {
    router(Arc::new(store))
}

pub fn router<S: TodoStore>(store: Arc<S>) -> Router {
    let collection = get(list_todos::<S>).post(create_todo::<S>);
    Router::new()
        .route("/todo", collection.clone())
        .route("/todo/", collection)
        .route(
            "/todo/{id}",
            get(get_todo::<S>)
                .put(update_todo::<S>)
                .delete(delete_todo::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serve `store` on an already bound listener until the process exits.
pub async fn run<S: TodoStore>(listener: TcpListener, store: S) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}
