use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// List (category) row joined with its todo counters.
#[derive(Debug, Clone, FromRow)]
pub struct ListRow {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub todo_count: i64,
    pub completed_count: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
