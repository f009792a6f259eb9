use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{TodoPriority, TodoStatus};
use crate::extract::double_option;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD`.
    pub due_date: Option<String>,
    pub list_id: Option<Uuid>,
}

/// Partial update. For the nullable fields an explicit `null` clears the value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub list_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoSort {
    Priority,
    DueDate,
    #[default]
    CreatedAt,
}

#[derive(Debug, Default, Deserialize)]
pub struct TodoQuery {
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub list_id: Option<Uuid>,
    pub q: Option<String>,
    #[serde(default)]
    pub sort: TodoSort,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ClearedCompleted {
    pub deleted: u64,
}
