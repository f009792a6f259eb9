use axum::{extract::State, routing::get, Router};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use super::{
    repo,
    repo_types::{Experience, Profile, Project},
};
use crate::{
    error::{AppError, AppResult},
    extract::{ApiPath, ApiQuery},
    response::ApiResponse,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    #[serde(default)]
    pub featured: bool,
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/experiences", get(list_experiences))
        .route("/projects", get(list_projects))
        .route("/projects/:id", get(get_project))
}

#[instrument(skip(state))]
pub async fn get_profile(State(state): State<AppState>) -> AppResult<ApiResponse<Profile>> {
    let profile = repo::get_profile(&state.db)
        .await?
        .ok_or(AppError::NotFound("Profile"))?;
    Ok(ApiResponse::ok(profile, "ok"))
}

#[instrument(skip(state))]
pub async fn list_experiences(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Experience>>> {
    Ok(ApiResponse::ok(repo::list_experiences(&state.db).await?, "ok"))
}

#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ProjectFilter>,
) -> AppResult<ApiResponse<Vec<Project>>> {
    let projects = repo::list_projects(&state.db, filter.featured).await?;
    Ok(ApiResponse::ok(projects, "ok"))
}

#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<Project>> {
    let project = repo::get_project(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Project"))?;
    Ok(ApiResponse::ok(project, "ok"))
}
