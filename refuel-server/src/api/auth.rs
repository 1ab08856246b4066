//! Account endpoints: signup, login, profile, password

use axum::{Json, extract::State, http::StatusCode};
use shared::error::{ApiResponse, AppError};
use shared::models::{
    LoginRequest, LoginResponse, PasswordUpdate, ProfileUpdate, SignupRequest, UserProfile,
};

use super::ApiResult;
use super::extract::ApiJson;
use crate::auth::CurrentUser;
use crate::services::accounts;
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let profile = accounts::signup(&state.pool, req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let resp = accounts::login(&state.pool, req, &state.jwt_secret, state.jwt_expiry_hours).await?;
    Ok(Json(resp))
}

/// GET /api/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> ApiResult<UserProfile> {
    Ok(Json(accounts::get_profile(&state.pool, &caller).await?))
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> ApiResult<UserProfile> {
    Ok(Json(
        accounts::update_profile(&state.pool, &caller, update).await?,
    ))
}

/// PUT /api/auth/update-password
pub async fn update_password(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiJson(update): ApiJson<PasswordUpdate>,
) -> Result<ApiResponse, AppError> {
    accounts::update_password(&state.pool, &caller, update).await?;
    Ok(ApiResponse::message("Password updated successfully"))
}
