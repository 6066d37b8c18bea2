//! Trigger and status handlers, plus the generic fallback.
//!
//! Both handlers delegate authentication to the dispatcher. A request the
//! dispatcher does not recognize as addressed to one of its triggers is
//! treated exactly like an unrelated route.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header::ALLOW;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use hookrun_types::error::DispatchError;
use hookrun_types::task::StatusReport;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthorizationHeader;
use crate::state::AppState;

/// POST /{id} - Start the trigger's script, or coalesce into the current run.
///
/// Responds `200 "OK"` or `200 "Already running, will restart when completed"`.
pub async fn trigger(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    auth: AuthorizationHeader,
    uri: Uri,
) -> Result<&'static str, AppError> {
    let id = id.ok().map(|Path(id)| id);
    let outcome = state
        .dispatcher
        .trigger(id.as_deref(), auth.as_deref())
        .map_err(|e| refused(e, &uri))?;
    Ok(outcome.message())
}

/// GET /{id} - Report the status of the trigger's latest run.
pub async fn status(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    auth: AuthorizationHeader,
    uri: Uri,
) -> Result<Json<StatusReport>, AppError> {
    let id = id.ok().map(|Path(id)| id);
    let report = state
        .dispatcher
        .status(id.as_deref(), auth.as_deref())
        .map_err(|e| refused(e, &uri))?;
    Ok(Json(report))
}

/// Fallback for every unmatched route or method.
///
/// `OPTIONS` is answered generically; everything else is `404`.
pub async fn fallback(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        return (StatusCode::NO_CONTENT, [(ALLOW, "GET, POST, OPTIONS")]).into_response();
    }
    not_found(&uri);
    AppError::NotFound(None).into_response()
}

fn refused(e: DispatchError, uri: &Uri) -> AppError {
    if e == DispatchError::NotMatched {
        not_found(uri);
    }
    AppError::from(e)
}

fn not_found(uri: &Uri) {
    tracing::warn!(path = %uri.path(), "trigger not found: {}", uri.path());
}
