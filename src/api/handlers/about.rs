//! Handlers for the about page.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::about::{AboutResponse, UpdateAboutRequest};
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/about` (public)
pub async fn get_about_handler(
    State(state): State<AppState>,
) -> Result<Json<AboutResponse>, AppError> {
    let info = state.about_service.get().await?;

    Ok(Json(info.into()))
}

/// Replaces the about description.
///
/// # Endpoint
///
/// `PUT /api/about` (admin only)
///
/// # Errors
///
/// - 400 Bad Request if the description is blank or longer than 2000 characters
/// - 403 Forbidden if the caller is not an admin
pub async fn update_about_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<UpdateAboutRequest>,
) -> Result<StatusCode, AppError> {
    if !identity.is_admin() {
        return Err(AppError::forbidden(
            "Only administrators can update the about information.",
            json!({ "required_role": "Admin" }),
        ));
    }

    payload.validate()?;

    state
        .about_service
        .update(&payload.description, identity.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
