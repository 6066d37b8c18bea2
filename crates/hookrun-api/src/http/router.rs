//! Axum router configuration with middleware.
//!
//! Routes: `POST /{id}` and `GET /{id}`. Every other path or method falls
//! through to the generic fallback.
//! Middleware: CORS (any origin), request tracing.

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route(
            "/{id}",
            get(handlers::trigger::status)
                .post(handlers::trigger::trigger)
                .fallback(handlers::trigger::fallback),
        )
        .fallback(handlers::trigger::fallback)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use hookrun_core::registry::TriggerRegistry;
    use hookrun_core::task::runner::TaskRunner;
    use hookrun_core::task::store::TaskStateStore;
    use hookrun_infra::script::process::ProcessScriptExecutor;
    use hookrun_types::trigger::Trigger;
    use tower::ServiceExt;

    use super::*;

    /// Script that records each run, then waits for a `release` file in its directory.
    const GATED_SCRIPT: &str =
        "#!/bin/sh\necho run >> runs.log\nwhile [ ! -f release ]; do sleep 0.05; done\nexit 0\n";

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn app(script: PathBuf) -> Router {
        let registry =
            TriggerRegistry::new(vec![Trigger::new("deploy-prod", "abc123", script)]).unwrap();
        let runner = TaskRunner::new(
            Arc::new(TaskStateStore::new()),
            Arc::new(ProcessScriptExecutor::new()),
        )
        .with_restart_delay(Duration::from_millis(10));
        build_router(AppState::with_runner(registry, runner))
    }

    fn request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(req).await.expect("router response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn status_of(app: &Router) -> serde_json::Value {
        let (code, body) = send(app, request("GET", "/deploy-prod", Some("Bearer abc123"))).await;
        assert_eq!(code, StatusCode::OK);
        serde_json::from_str(&body).unwrap()
    }

    async fn wait_for_status(app: &Router, expected: &str) {
        for _ in 0..200 {
            if status_of(app).await["status"] == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("status never became {expected}");
    }

    #[tokio::test]
    async fn deploy_scenario_coalesces_and_finishes_done() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "deploy.sh", GATED_SCRIPT);
        let app = app(script);

        let status = status_of(&app).await;
        assert_eq!(status, serde_json::json!({"id": "deploy-prod", "status": "unstarted"}));

        let (code, body) = send(&app, request("POST", "/deploy-prod", Some("Bearer abc123"))).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, "OK");

        let (code, body) = send(&app, request("POST", "/deploy-prod", Some("Bearer abc123"))).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, "Already running, will restart when completed");

        let status = status_of(&app).await;
        assert_eq!(status, serde_json::json!({"id": "deploy-prod", "status": "running"}));

        std::fs::write(tmp.path().join("release"), "").unwrap();

        // The queued restart runs once and also sees the release file.
        let runs_log = tmp.path().join("runs.log");
        for _ in 0..200 {
            let runs = std::fs::read_to_string(&runs_log).unwrap_or_default();
            if runs.lines().count() >= 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        wait_for_status(&app, "done").await;

        let runs = std::fs::read_to_string(&runs_log).unwrap();
        assert_eq!(runs.lines().count(), 2);
    }

    #[tokio::test]
    async fn failing_script_reports_failed() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "fail.sh", "#!/bin/sh\nexit 1\n");
        let app = app(script);

        let (code, body) = send(&app, request("POST", "/deploy-prod", Some("Bearer abc123"))).await;
        assert_eq!((code, body.as_str()), (StatusCode::OK, "OK"));
        wait_for_status(&app, "failed").await;
    }

    #[tokio::test]
    async fn refusals_are_indistinguishable_404s() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "deploy.sh", "#!/bin/sh\nexit 0\n");
        let app = app(script);

        let unknown = send(&app, request("POST", "/unknown-id", Some("Bearer abc123"))).await;
        let wrong_token = send(&app, request("POST", "/deploy-prod", Some("Bearer nope"))).await;
        let no_prefix = send(&app, request("POST", "/deploy-prod", Some("abc123"))).await;
        let lowercase = send(&app, request("GET", "/deploy-prod", Some("bearer abc123"))).await;
        let no_header = send(&app, request("GET", "/deploy-prod", None)).await;
        let unrelated = send(&app, request("GET", "/some/other/path", None)).await;
        let other_method = send(&app, request("PUT", "/deploy-prod", Some("Bearer abc123"))).await;

        let expected = (StatusCode::NOT_FOUND, "Not found".to_string());
        for response in [
            unknown,
            wrong_token,
            no_prefix,
            lowercase,
            no_header,
            unrelated,
            other_method,
        ] {
            assert_eq!(response, expected);
        }

        // None of the refused requests started a run.
        assert_eq!(status_of(&app).await["status"], "unstarted");
    }

    #[tokio::test]
    async fn options_is_answered_generically() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "deploy.sh", "#!/bin/sh\nexit 0\n");
        let app = app(script);

        for uri in ["/deploy-prod", "/anything/else"] {
            let response = app
                .clone()
                .oneshot(request("OPTIONS", uri, None))
                .await
                .unwrap();
            assert!(response.status().is_success());
        }
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "deploy.sh", "#!/bin/sh\nexit 0\n");
        let app = app(script);

        let req = Request::builder()
            .method("GET")
            .uri("/deploy-prod")
            .header("authorization", "Bearer abc123")
            .header("origin", "https://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
