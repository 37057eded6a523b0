//! Bearer token authentication middleware.
//!
//! A verified caller is stored in the request extensions as an
//! [`Identity`], which handlers extract with `Extension<Identity>`.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::Identity;
use crate::{error::AppError, state::AppState};

async fn bearer_token(parts: &mut Parts) -> Option<String> {
    AuthBearer::from_request_parts(parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token)
}

/// Rejects requests without a valid bearer token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header is
/// missing or malformed, or the token is invalid or expired.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/urls", post(create_url_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::require));
/// ```
pub async fn require(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = bearer_token(&mut parts).await.ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Authorization header is missing or invalid"}),
        )
    })?;

    let identity = st.account_service.authenticate(&token).await.map_err(|_| {
        AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Invalid or expired token"}),
        )
    })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Resolves the caller if a valid bearer token is present.
///
/// Missing or invalid tokens are treated as an anonymous request.
pub async fn optional(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let identity: Option<Identity> = match bearer_token(&mut parts).await {
        Some(token) => st.account_service.authenticate(&token).await.ok(),
        None => None,
    };

    let mut req = Request::from_parts(parts, body);
    if let Some(identity) = identity {
        req.extensions_mut().insert(identity);
    }

    next.run(req).await
}
