//! HTTP-facing error type.
//!
//! Every handler returns `Result<_, ApiError>`. Store failures and extractor
//! rejections are converted here so the response body is always
//! `{ "error": "<message>" }`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, StringRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::model::TodoId;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("todo {0} not found")]
    NotFound(TodoId),

    #[error("todo id must be a positive integer, got {0}")]
    InvalidId(TodoId),

    #[error(transparent)]
    Path(#[from] PathRejection),

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Body(#[from] StringRejection),

    #[error("invalid todo payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("storage failure")]
    Storage(#[source] sqlx::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::Storage(source) => ApiError::Storage(source),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidId(_) | ApiError::Payload(_) => StatusCode::BAD_REQUEST,
            ApiError::Path(rejection) => rejection.status(),
            ApiError::Json(rejection) => rejection.status(),
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(source) = &self {
            error!(error = %source, "storage failure");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
