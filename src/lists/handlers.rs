use axum::{
    extract::State,
    routing::get,
    Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateListRequest, ListResponse, UpdateListRequest},
    repo,
    services::{validate_create, validate_update},
};
use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    extract::{ApiJson, ApiPath},
    response::{ApiResponse, Created, Deleted},
    state::AppState,
};

const DUPLICATE_NAME: &str = "A list with this name already exists";

pub fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route(
            "/lists/:id",
            get(get_list).put(update_list).delete(delete_list),
        )
}

#[instrument(skip(state))]
pub async fn list_lists(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<ApiResponse<Vec<ListResponse>>> {
    let rows = repo::list_by_user(&state.db, user_id).await?;
    let items = rows.into_iter().map(ListResponse::from).collect();
    Ok(ApiResponse::ok(items, "ok"))
}

#[instrument(skip(state))]
pub async fn get_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<ListResponse>> {
    let row = repo::get_by_id(&state.db, user_id, id)
        .await?
        .ok_or(AppError::NotFound("List"))?;
    Ok(ApiResponse::ok(row.into(), "ok"))
}

#[instrument(skip(state, payload))]
pub async fn create_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(mut payload): ApiJson<CreateListRequest>,
) -> AppResult<Created<ListResponse>> {
    validate_create(&mut payload)?;
    let row = repo::create(&state.db, user_id, &payload.name, payload.color.as_deref())
        .await
        .map_err(AppError::conflict_on_unique(DUPLICATE_NAME))?;
    info!(%user_id, list_id = %row.id, "list created");
    Ok(Created::new(row.into(), "List created"))
}

#[instrument(skip(state, payload))]
pub async fn update_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(mut payload): ApiJson<UpdateListRequest>,
) -> AppResult<ApiResponse<ListResponse>> {
    validate_update(&mut payload)?;
    let color = payload.color.as_ref().map(|c| c.as_deref());
    let row = repo::update(&state.db, user_id, id, payload.name.as_deref(), color)
        .await
        .map_err(AppError::conflict_on_unique(DUPLICATE_NAME))?
        .ok_or(AppError::NotFound("List"))?;
    Ok(ApiResponse::ok(row.into(), "List updated"))
}

#[instrument(skip(state))]
pub async fn delete_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<ApiResponse<Deleted>> {
    if !repo::delete(&state.db, user_id, id).await? {
        return Err(AppError::NotFound("List"));
    }
    info!(%user_id, list_id = %id, "list deleted");
    Ok(ApiResponse::ok(Deleted { id }, "List deleted"))
}
