use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::ListRow;

const LIST_COLUMNS: &str = r#"
    l.id, l.name, l.color,
    COUNT(t.id) AS todo_count,
    COUNT(t.id) FILTER (WHERE t.status = 'completed') AS completed_count,
    l.created_at, l.updated_at
"#;

/// All lists of a user, alphabetically, with todo counters.
pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> Result<Vec<ListRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {LIST_COLUMNS}
        FROM lists l
        LEFT JOIN todos t ON t.list_id = l.id
        WHERE l.user_id = $1
        GROUP BY l.id
        ORDER BY lower(l.name) ASC, l.created_at ASC
        "#
    );
    sqlx::query_as::<_, ListRow>(&sql)
        .bind(user_id)
        .fetch_all(db)
        .await
}

pub async fn get_by_id(
    db: &PgPool,
    user_id: Uuid,
    list_id: Uuid,
) -> Result<Option<ListRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {LIST_COLUMNS}
        FROM lists l
        LEFT JOIN todos t ON t.list_id = l.id
        WHERE l.id = $1 AND l.user_id = $2
        GROUP BY l.id
        "#
    );
    sqlx::query_as::<_, ListRow>(&sql)
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
}

/// True when `list_id` exists and belongs to `user_id`.
pub async fn is_owned_by(db: &PgPool, user_id: Uuid, list_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS (SELECT 1 FROM lists WHERE id = $1 AND user_id = $2)"#,
    )
    .bind(list_id)
    .bind(user_id)
    .fetch_one(db)
    .await
}

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    color: Option<&str>,
) -> Result<ListRow, sqlx::Error> {
    sqlx::query_as::<_, ListRow>(
        r#"
        INSERT INTO lists (user_id, name, color)
        VALUES ($1, $2, $3)
        RETURNING id, name, color,
                  0::BIGINT AS todo_count, 0::BIGINT AS completed_count,
                  created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(color)
    .fetch_one(db)
    .await
}

/// Applies a partial update. `color` is `None` to keep, `Some(None)` to clear.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    list_id: Uuid,
    name: Option<&str>,
    color: Option<Option<&str>>,
) -> Result<Option<ListRow>, sqlx::Error> {
    sqlx::query_as::<_, ListRow>(
        r#"
        WITH updated AS (
            UPDATE lists
               SET name = COALESCE($3, name),
                   color = CASE WHEN $4 THEN $5 ELSE color END,
                   updated_at = now()
             WHERE id = $1 AND user_id = $2
            RETURNING id, name, color, created_at, updated_at
        )
        SELECT u.id, u.name, u.color,
               COUNT(t.id) AS todo_count,
               COUNT(t.id) FILTER (WHERE t.status = 'completed') AS completed_count,
               u.created_at, u.updated_at
        FROM updated u
        LEFT JOIN todos t ON t.list_id = u.id
        GROUP BY u.id, u.name, u.color, u.created_at, u.updated_at
        "#,
    )
    .bind(list_id)
    .bind(user_id)
    .bind(name)
    .bind(color.is_some())
    .bind(color.flatten())
    .fetch_optional(db)
    .await
}

/// Deletes a list and, through the foreign key, its todos.
pub async fn delete(db: &PgPool, user_id: Uuid, list_id: Uuid) -> Result<bool, sqlx::Error> {
    let res = sqlx::query(r#"DELETE FROM lists WHERE id = $1 AND user_id = $2"#)
        .bind(list_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
