//! API route configuration.
//!
//! Protected routes go through [`crate::api::middleware::auth::require`];
//! the listing goes through [`crate::api::middleware::auth::optional`].

use crate::api::handlers::{
    create_url_handler, delete_url_handler, get_about_handler, get_url_handler, list_urls_handler,
    login_handler, me_handler, register_handler, update_about_handler,
};
use crate::api::middleware::{auth, rate_limit};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// All `/api` routes.
///
/// # Endpoints
///
/// - `GET    /urls`           - List short URLs (optional auth)
/// - `GET    /urls/{id}`      - Get one short URL (auth)
/// - `POST   /urls`           - Shorten a URL (auth)
/// - `DELETE /urls/{id}`      - Delete a short URL (auth, owner or admin)
/// - `POST   /auth/register`  - Register
/// - `POST   /auth/login`     - Login
/// - `GET    /auth/me`        - Caller profile (auth)
/// - `GET    /about`          - About information
/// - `PUT    /about`          - Update about information (admin)
///
/// When `rate_limited` is set, the credential endpoints get the strict limiter
/// and everything else the public one.
pub fn api_routes(state: AppState, rate_limited: bool) -> Router<AppState> {
    let protected = Router::new()
        .route("/urls", post(create_url_handler))
        .route("/urls/{id}", get(get_url_handler).delete(delete_url_handler))
        .route("/auth/me", get(me_handler))
        .route("/about", axum::routing::put(update_about_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require));

    let public = Router::new()
        .route("/urls", get(list_urls_handler))
        .route("/about", get(get_about_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::optional));

    let credentials = Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler));

    if rate_limited {
        Router::new()
            .merge(protected.layer(rate_limit::layer()))
            .merge(public.layer(rate_limit::layer()))
            .merge(credentials.layer(rate_limit::secure_layer()))
    } else {
        Router::new().merge(protected).merge(public).merge(credentials)
    }
}
