//! Handlers for registration, login, token refresh, and logout.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use storyweave_core::error::CoreError;
use storyweave_core::roles::ROLE_USER;
use storyweave_db::models::user::CreateUser;
use storyweave_db::repositories::{RoleRepo, SessionRepo, UserRepo};

use crate::auth::jwt;
use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub locale: Option<String>,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a storyteller account with the default `user` role.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    if input.username.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "username must not be empty".into(),
        )));
    }
    if input.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ))));
    }

    let role = RoleRepo::find_by_name(&state.pool, ROLE_USER)
        .await?
        .ok_or_else(|| AppError::InternalError("default role is not seeded".into()))?;

    let password_hash = password::hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            phone: input.phone,
            locale: input.locale,
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "id": user.id, "username": user.username }),
    }))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and issue an access/refresh token pair.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<TokenResponse>>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    if !password::verify_password(&input.password, &user.password_hash) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    let role = UserRepo::role_name(&state.pool, user.id)
        .await?
        .unwrap_or_else(|| ROLE_USER.to_string());

    let tokens = issue_tokens(&state, user.id, &role).await?;
    UserRepo::touch_last_login(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(DataResponse { data: tokens }))
}

/// POST /api/v1/auth/refresh
///
/// Rotate a refresh token: revoke the presented session and issue a new pair.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<DataResponse<TokenResponse>>> {
    let hash = jwt::hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_live_by_hash(&state.pool, &hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let role = UserRepo::role_name(&state.pool, session.user_id)
        .await?
        .unwrap_or_else(|| ROLE_USER.to_string());

    let tokens = issue_tokens(&state, session.user_id, &role).await?;
    Ok(Json(DataResponse { data: tokens }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented refresh token's session.
pub async fn logout(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<impl IntoResponse> {
    let hash = jwt::hash_refresh_token(&input.refresh_token);
    if let Some(session) = SessionRepo::find_live_by_hash(&state.pool, &hash).await? {
        SessionRepo::revoke(&state.pool, session.id).await?;
    }
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Generate an access token and persist a new refresh-token session.
async fn issue_tokens(
    state: &AppState,
    user_id: storyweave_core::types::DbId,
    role: &str,
) -> AppResult<TokenResponse> {
    let access_token = jwt::generate_access_token(user_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("token generation failed: {e}")))?;

    let (refresh_token, refresh_hash) = jwt::generate_refresh_token();
    let expires_at =
        chrono::Utc::now() + Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::create(&state.pool, user_id, &refresh_hash, expires_at).await?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
    })
}
