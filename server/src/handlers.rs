//! The five `/todo` operations.
//!
//! Handlers hold no state of their own: each one performs a single lookup or
//! write against the shared store and translates the result.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use tracing::info;

use crate::error::ApiError;
use crate::model::{NewTodo, Todo, TodoId, UpdateTodo};
use crate::store::TodoStore;

/// Acknowledgement body returned by delete.
pub const DELETE_ACK: &str = "ok";

/// `{id}` path segment, rejected unless it is a positive integer.
#[derive(Debug, Clone, Copy)]
pub struct TodoPath(pub TodoId);

impl<S> FromRequestParts<S> for TodoPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<TodoId>::from_request_parts(parts, state).await?;
        if id <= 0 {
            return Err(ApiError::InvalidId(id));
        }
        Ok(Self(id))
    }
}

impl<S> FromRequest<S> for NewTodo
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(req.headers());
        let body = String::from_request(req, state).await?;
        if json {
            Ok(serde_json::from_str(&body)?)
        } else {
            Ok(NewTodo::Text(body))
        }
    }
}

impl<S> FromRequest<S> for UpdateTodo
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(input) = Json::<UpdateTodo>::from_request(req, state).await?;
        Ok(input)
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

pub async fn list_todos<S: TodoStore>(
    State(store): State<Arc<S>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(store.find_all().await?))
}

pub async fn get_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    TodoPath(id): TodoPath,
) -> Result<Json<Todo>, ApiError> {
    store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

pub async fn create_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    input: NewTodo,
) -> Result<(StatusCode, HeaderMap, Json<Todo>), ApiError> {
    let todo = store.save(input.into_draft()).await?;
    info!(id = todo.id, "todo created");

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/todo/{}", todo.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(todo)))
}

pub async fn update_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    TodoPath(id): TodoPath,
    input: UpdateTodo,
) -> Result<Json<Todo>, ApiError> {
    let existing = store.find_by_id(id).await?.ok_or(ApiError::NotFound(id))?;
    let todo = store.save(input.apply(existing)).await?;
    info!(id, done = todo.done, "todo updated");
    Ok(Json(todo))
}

pub async fn delete_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    TodoPath(id): TodoPath,
) -> Result<&'static str, ApiError> {
    let existed = store.delete_by_id(id).await?;
    info!(id, existed, "todo deleted");
    Ok(DELETE_ACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(content_type).unwrap(),
        );
        headers
    }

    #[test]
    fn json_content_types_are_detected() {
        assert!(is_json(&headers_with("application/json")));
        assert!(is_json(&headers_with("application/json; charset=utf-8")));
        assert!(is_json(&headers_with("application/merge-patch+json")));
    }

    #[test]
    fn plain_or_missing_content_type_is_raw_text() {
        assert!(!is_json(&headers_with("text/plain")));
        assert!(!is_json(&HeaderMap::new()));
    }
}
