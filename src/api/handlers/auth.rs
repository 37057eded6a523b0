//! Handlers for registration, login and the caller's profile.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::auth::{AuthResponseDto, LoginRequest, RegisterRequest, UserInfoResponse};
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Registers an account with the `User` role and returns a bearer token.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 400 Bad Request on invalid input or if the email or username is taken.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponseDto>, AppError> {
    payload.validate()?;

    let response = state
        .account_service
        .register(&payload.email, &payload.username, &payload.password)
        .await?;

    Ok(Json(response.into()))
}

/// Exchanges email and password for a bearer token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 Unauthorized on any credential mismatch.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponseDto>, AppError> {
    payload.validate()?;

    let response = state
        .account_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(response.into()))
}

/// `GET /api/auth/me`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<UserInfoResponse>, AppError> {
    let user = state.account_service.current_user(&identity).await?;

    Ok(Json(user.into()))
}
