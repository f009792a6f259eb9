use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub bio: String,
    pub email: String,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub links: serde_json::Value, // label -> url
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Experience {
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub period_start: String,
    pub period_end: Option<String>, // None while current
    pub summary: String,
    pub highlights: Vec<String>,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub summary: String,
    pub tech: Vec<String>,
    pub url: Option<String>,
    pub repo_url: Option<String>,
    pub featured: bool,
    pub position: i32,
}
