//! Handlers for the short URL collection.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::short_url::{
    CreateShortUrlRequest, CreateShortUrlResponse, ShortUrlListItem, ShortUrlResponse,
};
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_check::check_original_url;

/// Lists all short URLs, most recent first.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// # Visibility
///
/// Authenticated callers receive full rows. Anonymous callers (or callers with
/// an invalid token) receive rows without `id` and `created_by_user_id`.
///
/// # Response
///
/// ```json
/// [
///   {
///     "original_url": "https://example.com/a",
///     "short_code": "aB3dE9xZ",
///     "created_by_username": "alice",
///     "created_at": "2025-01-01T12:00:00Z"
///   }
/// ]
/// ```
pub async fn list_urls_handler(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
) -> Result<Json<Vec<ShortUrlListItem>>, AppError> {
    let rows = state.short_url_service.list(identity.is_some()).await?;

    Ok(Json(rows.into_iter().map(ShortUrlListItem::from).collect()))
}

/// Returns one short URL with owner information.
///
/// # Endpoint
///
/// `GET /api/urls/{id}` (authentication required)
///
/// # Errors
///
/// Returns 404 Not Found if the entry does not exist.
pub async fn get_url_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let entry = state.short_url_service.get(id).await?;

    Ok(Json(entry.into()))
}

/// Shortens a URL on behalf of the caller.
///
/// # Endpoint
///
/// `POST /api/urls` (authentication required)
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// `201 Created` with `{ "id": "<uuid>" }`.
///
/// # Errors
///
/// - 400 Bad Request if the URL is not an absolute HTTP/HTTPS URL
/// - 409 Conflict if the URL has already been shortened
pub async fn create_url_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateShortUrlRequest>,
) -> Result<(StatusCode, Json<CreateShortUrlResponse>), AppError> {
    payload.validate()?;
    check_original_url(&payload.original_url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    let id = state
        .short_url_service
        .create(&payload.original_url, identity.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(CreateShortUrlResponse { id })))
}

/// Deletes a short URL.
///
/// # Endpoint
///
/// `DELETE /api/urls/{id}` (authentication required)
///
/// Only the owner or an admin may delete an entry.
///
/// # Errors
///
/// - 403 Forbidden if the caller is neither owner nor admin
/// - 404 Not Found if the entry does not exist
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .short_url_service
        .delete(id, identity.user_id, identity.is_admin())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
