use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Todo row as stored; status and priority are constrained TEXT columns.
#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: Uuid,
    pub list_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
