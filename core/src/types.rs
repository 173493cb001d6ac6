//! Wire types for the `/todo` API.
//!
//! # Design
//! Defined independently of the server crate so the client carries no axum
//! or sqlx dependency. The integration test runs both crates together and
//! catches schema drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for replacing the mutable fields of a todo. Both fields
/// are always sent; the server never merges partial updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub text: String,
    pub done: bool,
}
