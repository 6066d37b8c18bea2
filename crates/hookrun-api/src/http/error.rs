//! Application error type mapping to HTTP responses.
//!
//! Every request failure ends up as the same plain `404 Not found`, whether
//! the route is unrelated, the trigger is unknown, or the token is wrong.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hookrun_types::error::DispatchError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Refused request; carries the dispatcher's reason for logging only.
    NotFound(Option<DispatchError>),
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        AppError::NotFound(Some(e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(reason) => {
                if let Some(reason) = reason {
                    tracing::debug!(%reason, "request refused");
                }
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
        }
    }
}
