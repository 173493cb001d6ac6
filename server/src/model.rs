//! Todo record and request payloads.
//!
//! # Design
//! `Todo` is both the stored row and the wire representation. An unsaved
//! value carries `id == 0`; the store assigns the real id and `created_at`
//! when it is first saved. Request payloads are separate types so clients
//! can never overwrite `id` or `createdAt`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier. `0` marks a value that has not been saved yet.
pub type TodoId = i64;

/// A single task as stored and as serialized on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Build an unsaved todo. `id` and `created_at` are replaced on save.
    pub fn draft(text: impl Into<String>, done: bool) -> Self {
        Self {
            id: 0,
            text: text.into(),
            done,
            created_at: Utc::now(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

/// Create payload. Accepts a bare description or `{ "text", "done"? }`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NewTodo {
    Text(String),
    Fields {
        text: String,
        #[serde(default)]
        done: bool,
    },
}

impl NewTodo {
    pub fn into_draft(self) -> Todo {
        match self {
            NewTodo::Text(text) => Todo::draft(text, false),
            NewTodo::Fields { text, done } => Todo::draft(text, done),
        }
    }
}

/// Replacement values for an existing todo. Unknown keys such as `id` and
/// `createdAt` are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl UpdateTodo {
    /// Copy the mutable fields onto `existing`, leaving `id` and `created_at`.
    pub fn apply(self, mut existing: Todo) -> Todo {
        existing.text = self.text;
        existing.done = self.done;
        existing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_camel_case_timestamp() {
        let created_at = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let todo = Todo {
            id: 7,
            text: "Buy milk".to_string(),
            done: false,
            created_at,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["text"], "Buy milk");
        assert_eq!(json["done"], false);
        assert_eq!(json["createdAt"], "2024-03-01T12:00:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn draft_is_new_and_not_done() {
        let todo = Todo::draft("Walk dog", false);
        assert!(todo.is_new());
        assert!(!todo.done);
    }

    #[test]
    fn new_todo_accepts_bare_string() {
        let input: NewTodo = serde_json::from_str(r#""Buy milk""#).unwrap();
        let draft = input.into_draft();
        assert_eq!(draft.text, "Buy milk");
        assert!(!draft.done);
    }

    #[test]
    fn new_todo_object_defaults_done_to_false() {
        let input: NewTodo = serde_json::from_str(r#"{"text":"Read"}"#).unwrap();
        assert_eq!(
            input,
            NewTodo::Fields {
                text: "Read".to_string(),
                done: false
            }
        );
    }

    #[test]
    fn new_todo_rejects_missing_text() {
        let result: Result<NewTodo, _> = serde_json::from_str(r#"{"done":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_ignores_id_and_created_at() {
        let existing = Todo::draft("old", false);
        let created_at = existing.created_at;
        let input: UpdateTodo = serde_json::from_str(
            r#"{"id":42,"text":"new","done":true,"createdAt":"1999-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let updated = input.apply(Todo { id: 3, ..existing });
        assert_eq!(updated.id, 3);
        assert_eq!(updated.text, "new");
        assert!(updated.done);
        assert_eq!(updated.created_at, created_at);
    }

    #[test]
    fn update_missing_fields_fall_back_to_defaults() {
        let input: UpdateTodo = serde_json::from_str("{}").unwrap();
        assert_eq!(input.text, "");
        assert!(!input.done);
    }
}
