use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Experience, Profile, Project};

pub async fn get_profile(db: &PgPool) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT name, headline, bio, email, location, avatar_url, links, updated_at
        FROM profile
        LIMIT 1
        "#,
    )
    .fetch_optional(db)
    .await
}

pub async fn list_experiences(db: &PgPool) -> Result<Vec<Experience>, sqlx::Error> {
    sqlx::query_as::<_, Experience>(
        r#"
        SELECT id, company, role, period_start, period_end, summary, highlights, position
        FROM experiences
        ORDER BY position ASC
        "#,
    )
    .fetch_all(db)
    .await
}

/// Projects in display order; `featured_only` narrows to highlighted ones.
pub async fn list_projects(db: &PgPool, featured_only: bool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, name, summary, tech, url, repo_url, featured, position
        FROM projects
        WHERE featured OR NOT $1
        ORDER BY position ASC
        "#,
    )
    .bind(featured_only)
    .fetch_all(db)
    .await
}

pub async fn get_project(db: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, name, summary, tech, url, repo_url, featured, position
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}
