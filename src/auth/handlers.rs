use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthPayload, LoginRequest, PublicUser, RefreshRequest, RegisterRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo_types::User,
        services::{is_valid_email, issue_tokens, normalize_email, validate_registration},
    },
    error::{AppError, AppResult},
    extract::ApiJson,
    response::{ApiResponse, Created},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(mut payload): ApiJson<RegisterRequest>,
) -> AppResult<Created<AuthPayload>> {
    validate_registration(&mut payload)?;

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.email, &payload.name, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    let tokens = issue_tokens(&JwtKeys::from_ref(&state), user.into())?;
    Ok(Created::new(tokens, "Registration successful"))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> AppResult<ApiResponse<AuthPayload>> {
    let email = normalize_email(&payload.email);
    if payload.password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }
    // A malformed address cannot belong to any account.
    if !is_valid_email(&email) {
        warn!(%email, "login malformed email");
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(%email, "login unknown email");
        return Err(AppError::unauthorized("Invalid credentials"));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(%email, user_id = %user.id, "login invalid password");
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    info!(user_id = %user.id, %email, "user logged in");
    let tokens = issue_tokens(&JwtKeys::from_ref(&state), user.into())?;
    Ok(ApiResponse::ok(tokens, "Login successful"))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RefreshRequest>,
) -> AppResult<ApiResponse<AuthPayload>> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        AppError::unauthorized("Invalid or expired refresh token")
    })?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;

    let tokens = issue_tokens(&keys, user.into())?;
    Ok(ApiResponse::ok(tokens, "Token refreshed"))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<ApiResponse<PublicUser>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User not found"))?;
    Ok(ApiResponse::ok(user.into(), "ok"))
}
