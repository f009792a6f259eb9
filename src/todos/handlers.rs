use axum::{
    extract::State,
    routing::{delete, get, patch},
    Router,
};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{ClearedCompleted, CreateTodoRequest, TodoQuery, UpdateTodoRequest},
    model::Todo,
    repo,
    services::{apply_query, validate_create, validate_update},
};
use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    extract::{ApiJson, ApiPath, ApiQuery},
    lists,
    response::{ApiResponse, Created, Deleted},
    state::AppState,
};

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/completed", delete(clear_completed))
        .route(
            "/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/:id/toggle", patch(toggle_todo))
}

/// A todo may only be attached to one of the caller's own lists.
async fn ensure_list_owned(db: &PgPool, user_id: Uuid, list_id: Option<Uuid>) -> AppResult<()> {
    if let Some(list_id) = list_id {
        if !lists::repo::is_owned_by(db, user_id, list_id).await? {
            return Err(AppError::validation("List does not exist"));
        }
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn list_todos(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiQuery(query): ApiQuery<TodoQuery>,
) -> AppResult<ApiResponse<Vec<Todo>>> {
    let todos = repo::list_by_user(&state.db, user_id)
        .await?
        .into_iter()
        .map(Todo::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let (page, meta) = apply_query(todos, &query);
    Ok(ApiResponse::paginated(page, meta))
}

#[instrument(skip(state))]
pub async fn get_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<Todo>> {
    let row = repo::get_by_id(&state.db, user_id, id)
        .await?
        .ok_or(AppError::NotFound("Todo"))?;
    Ok(ApiResponse::ok(Todo::try_from(row)?, "ok"))
}

#[instrument(skip(state, payload))]
pub async fn create_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<CreateTodoRequest>,
) -> AppResult<Created<Todo>> {
    let new = validate_create(payload)?;
    ensure_list_owned(&state.db, user_id, new.list_id).await?;

    let todo = Todo::try_from(repo::create(&state.db, user_id, &new).await?)?;
    info!(%user_id, todo_id = %todo.id, "todo created");
    Ok(Created::new(todo, "Todo created"))
}

#[instrument(skip(state, payload))]
pub async fn update_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateTodoRequest>,
) -> AppResult<ApiResponse<Todo>> {
    let changes = validate_update(payload)?;
    ensure_list_owned(&state.db, user_id, changes.list_id.flatten()).await?;

    let row = repo::update(&state.db, user_id, id, &changes)
        .await?
        .ok_or(AppError::NotFound("Todo"))?;
    Ok(ApiResponse::ok(Todo::try_from(row)?, "Todo updated"))
}

#[instrument(skip(state))]
pub async fn toggle_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<Todo>> {
    let row = repo::toggle(&state.db, user_id, id)
        .await?
        .ok_or(AppError::NotFound("Todo"))?;
    let todo = Todo::try_from(row)?;
    info!(%user_id, todo_id = %id, status = %todo.status, "todo toggled");
    Ok(ApiResponse::ok(todo, "Todo updated"))
}

#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<Deleted>> {
    if !repo::delete(&state.db, user_id, id).await? {
        return Err(AppError::NotFound("Todo"));
    }
    info!(%user_id, todo_id = %id, "todo deleted");
    Ok(ApiResponse::ok(Deleted { id }, "Todo deleted"))
}

#[instrument(skip(state))]
pub async fn clear_completed(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<ApiResponse<ClearedCompleted>> {
    let deleted = repo::delete_completed(&state.db, user_id).await?;
    info!(%user_id, deleted, "completed todos cleared");
    Ok(ApiResponse::ok(
        ClearedCompleted { deleted },
        format!("{deleted} completed todo(s) deleted"),
    ))
}
