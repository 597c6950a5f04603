//! # Private Todo Data Transfer Objects

use chrono::{DateTime, Utc};
use entity::{private_todos, TodoStatus};
use serde::{Deserialize, Serialize};

use crate::dto::double_option;

/// Request body for creating a private todo
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Defaults to TODO when absent
    #[serde(default)]
    pub status: Option<String>,

    /// RFC 3339 datetime
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Request body for updating a private todo. Absent fields are untouched;
/// explicit nulls clear the clearable fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
}

/// Private todo as returned to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoResponse {
    pub id:          i32,
    pub title:       String,
    pub description: Option<String>,
    pub status:      TodoStatus,
    pub due_date:    Option<DateTime<Utc>>,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
}

impl From<private_todos::Model> for TodoResponse {
    fn from(todo: private_todos::Model) -> Self {
        Self {
            id:          todo.id,
            title:       todo.title,
            description: todo.description,
            status:      todo.status,
            due_date:    todo.due_date,
            created_at:  todo.created_at,
            updated_at:  todo.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_absent_from_null() {
        let absent: UpdateTodoRequest = serde_json::from_str(r#"{"title": "new"}"#).unwrap();
        assert_eq!(absent.title.as_deref(), Some("new"));
        assert_eq!(absent.due_date, None);

        let cleared: UpdateTodoRequest = serde_json::from_str(r#"{"due_date": null}"#).unwrap();
        assert_eq!(cleared.due_date, Some(None));
    }

    #[test]
    fn test_create_request_minimal_body() {
        let req: CreateTodoRequest = serde_json::from_str(r#"{"title": "buy milk"}"#).unwrap();
        assert_eq!(req.title, "buy milk");
        assert!(req.description.is_none());
        assert!(req.status.is_none());
        assert!(req.due_date.is_none());
    }
}
