use sqlx::PgPool;
use uuid::Uuid;

use super::{
    repo_types::TodoRow,
    services::{NewTodo, TodoChanges},
};

const TODO_COLUMNS: &str = r#"
    id, list_id, title, description, status, priority,
    due_date, completed_at, created_at, updated_at
"#;

/// Every todo of a user; filtering and ordering happen in memory.
pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> Result<Vec<TodoRow>, sqlx::Error> {
    let sql = format!("SELECT {TODO_COLUMNS} FROM todos WHERE user_id = $1");
    sqlx::query_as::<_, TodoRow>(&sql)
        .bind(user_id)
        .fetch_all(db)
        .await
}

pub async fn get_by_id(
    db: &PgPool,
    user_id: Uuid,
    todo_id: Uuid,
) -> Result<Option<TodoRow>, sqlx::Error> {
    let sql = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 AND user_id = $2");
    sqlx::query_as::<_, TodoRow>(&sql)
        .bind(todo_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
}

pub async fn create(db: &PgPool, user_id: Uuid, new: &NewTodo) -> Result<TodoRow, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO todos (user_id, list_id, title, description, status, priority, due_date, completed_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, CASE WHEN $5 = 'completed' THEN now() END)
        RETURNING {TODO_COLUMNS}
        "#
    );
    sqlx::query_as::<_, TodoRow>(&sql)
        .bind(user_id)
        .bind(new.list_id)
        .bind(&new.title)
        .bind(new.description.as_deref())
        .bind(new.status.as_str())
        .bind(new.priority.as_str())
        .bind(new.due_date)
        .fetch_one(db)
        .await
}

/// Applies a partial update in one statement. `completed_at` is stamped when
/// the resulting status is `completed` and cleared otherwise.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    todo_id: Uuid,
    changes: &TodoChanges,
) -> Result<Option<TodoRow>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE todos
           SET title        = COALESCE($3, title),
               description  = CASE WHEN $4 THEN $5 ELSE description END,
               status       = COALESCE($6, status),
               priority     = COALESCE($7, priority),
               due_date     = CASE WHEN $8 THEN $9 ELSE due_date END,
               list_id      = CASE WHEN $10 THEN $11 ELSE list_id END,
               completed_at = CASE
                                  WHEN COALESCE($6, status) = 'completed'
                                  THEN COALESCE(completed_at, now())
                              END,
               updated_at   = now()
         WHERE id = $1 AND user_id = $2
        RETURNING {TODO_COLUMNS}
        "#
    );
    sqlx::query_as::<_, TodoRow>(&sql)
        .bind(todo_id)
        .bind(user_id)
        .bind(changes.title.as_deref())
        .bind(changes.description.is_some())
        .bind(changes.description.clone().flatten())
        .bind(changes.status.map(|s| s.as_str()))
        .bind(changes.priority.map(|p| p.as_str()))
        .bind(changes.due_date.is_some())
        .bind(changes.due_date.flatten())
        .bind(changes.list_id.is_some())
        .bind(changes.list_id.flatten())
        .fetch_optional(db)
        .await
}

/// Flips `completed` ↔ `pending`; other statuses become `completed`.
pub async fn toggle(
    db: &PgPool,
    user_id: Uuid,
    todo_id: Uuid,
) -> Result<Option<TodoRow>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE todos
           SET status       = CASE WHEN status = 'completed' THEN 'pending' ELSE 'completed' END,
               completed_at = CASE WHEN status = 'completed' THEN NULL ELSE now() END,
               updated_at   = now()
         WHERE id = $1 AND user_id = $2
        RETURNING {TODO_COLUMNS}
        "#
    );
    sqlx::query_as::<_, TodoRow>(&sql)
        .bind(todo_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
}

pub async fn delete(db: &PgPool, user_id: Uuid, todo_id: Uuid) -> Result<bool, sqlx::Error> {
    let res = sqlx::query(r#"DELETE FROM todos WHERE id = $1 AND user_id = $2"#)
        .bind(todo_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn delete_completed(db: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let res = sqlx::query(r#"DELETE FROM todos WHERE user_id = $1 AND status = 'completed'"#)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}
