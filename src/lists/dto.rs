use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::ListRow;
use crate::extract::double_option;

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
    pub color: Option<String>,
}

/// Partial update; `color: null` clears the color.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateListRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub color: Option<Option<String>>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub todo_count: i64,
    pub completed_count: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ListRow> for ListResponse {
    fn from(r: ListRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            color: r.color,
            todo_count: r.todo_count,
            completed_count: r.completed_count,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
