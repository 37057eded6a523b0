//! Converts handler panics into the generic 500 error body.

use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::{AppError, GENERIC_INTERNAL_MESSAGE};

/// Creates the outermost panic guard.
///
/// The panic payload is logged at `ERROR`; the client only sees the generic
/// internal error.
pub fn layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic as fn(Box<dyn Any + Send + 'static>) -> Response)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "Handler panicked");

    AppError::internal(GENERIC_INTERNAL_MESSAGE, json!({})).into_response()
}
