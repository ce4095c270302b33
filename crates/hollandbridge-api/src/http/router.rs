//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route("/sessions/{id}/advance", post(handlers::session::advance))
        .route("/sessions/{id}/retreat", post(handlers::session::retreat))
        .route(
            "/sessions/{id}/answers",
            axum::routing::patch(handlers::session::update_answers),
        )
        .route("/sessions/{id}/prompt", get(handlers::session::get_prompt))
        .route("/sessions/{id}/submit", post(handlers::session::submit))
        .route("/sessions/{id}/report", get(handlers::session::get_report));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::state::test_support::{mock_state, MockReply};

    const MARKUP: &str = "<h1> The Holland Bridge </h1>\n<b> Climate Tech </b>";

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send_json(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let (status, text) = send(app, method, uri, body).await;
        (status, serde_json::from_str(&text).unwrap())
    }

    async fn new_session(app: &Router) -> String {
        let (status, json) = send_json(app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_str().unwrap().to_string()
    }

    async fn to_last_step(app: &Router, id: &str) {
        for _ in 0..4 {
            let (status, _) =
                send_json(app, "POST", &format!("/api/v1/sessions/{id}/advance"), None).await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(mock_state(false, MockReply::Fail));
        let (status, json) = send_json(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let app = build_router(mock_state(false, MockReply::Fail));
        let id = new_session(&app).await;

        let (status, json) = send_json(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["step"], 1);
        assert_eq!(json["data"]["step_title"], "Select Your Holland Codes");
        assert_eq!(json["data"]["submission"]["state"], "idle");
        assert_eq!(json["_links"]["self"], format!("/api/v1/sessions/{id}"));
    }

    #[tokio::test]
    async fn test_navigation_clamps() {
        let app = build_router(mock_state(false, MockReply::Fail));
        let id = new_session(&app).await;

        let (_, json) =
            send_json(&app, "POST", &format!("/api/v1/sessions/{id}/retreat"), None).await;
        assert_eq!(json["data"]["step"], 1);

        for _ in 0..7 {
            send_json(&app, "POST", &format!("/api/v1/sessions/{id}/advance"), None).await;
        }
        let (_, json) = send_json(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(json["data"]["step"], 5);
        assert_eq!(json["data"]["can_advance"], false);
    }

    #[tokio::test]
    async fn test_unknown_and_invalid_ids() {
        let app = build_router(mock_state(false, MockReply::Fail));

        let missing = uuid::Uuid::now_v7();
        let (status, json) =
            send_json(&app, "GET", &format!("/api/v1/sessions/{missing}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["errors"][0]["code"], "SESSION_NOT_FOUND");
        assert!(json["data"].is_null());

        let (status, json) = send_json(&app, "GET", "/api/v1/sessions/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_answers_and_cap() {
        let app = build_router(mock_state(false, MockReply::Fail));
        let id = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/answers");

        for code in ["Social", "Artistic", "Realistic"] {
            let body = format!(r#"{{"field":"select_holland_code","value":"{code}"}}"#);
            let (status, json) = send_json(&app, "PATCH", &uri, Some(&body)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["data"]["outcome"], "applied");
        }

        let body = r#"{"field":"select_holland_code","value":"Conventional"}"#;
        let (status, json) = send_json(&app, "PATCH", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["outcome"], "cap_reached");
        assert_eq!(
            json["data"]["session"]["answers"]["holland_codes"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_malformed_and_unknown_field_rejected() {
        let app = build_router(mock_state(false, MockReply::Fail));
        let id = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/answers");

        let (status, json) = send_json(&app, "PATCH", &uri, Some("{ nope")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");

        let (status, _) =
            send_json(&app, "PATCH", &uri, Some(r#"{"field":"favourite_colour","value":"red"}"#))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_prompt_endpoint() {
        let app = build_router(mock_state(false, MockReply::Fail));
        let id = new_session(&app).await;
        send_json(
            &app,
            "PATCH",
            &format!("/api/v1/sessions/{id}/answers"),
            Some(r#"{"field":"industries_to_avoid","value":"Tobacco"}"#),
        )
        .await;

        let (status, json) =
            send_json(&app, "GET", &format!("/api/v1/sessions/{id}/prompt"), None).await;
        assert_eq!(status, StatusCode::OK);
        let prompt = json["data"]["prompt"].as_str().unwrap();
        assert!(prompt.ends_with("### INDUSTRIES TO AVOID:\nTobacco\n"));
    }

    #[tokio::test]
    async fn test_submit_before_last_step() {
        let app = build_router(mock_state(true, MockReply::Markup(MARKUP.to_string())));
        let id = new_session(&app).await;

        let (status, json) =
            send_json(&app, "POST", &format!("/api/v1/sessions/{id}/submit"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["errors"][0]["code"], "NOT_ON_FINAL_STEP");
    }

    #[tokio::test]
    async fn test_submit_without_credential_keeps_answers() {
        let app = build_router(mock_state(false, MockReply::Markup(MARKUP.to_string())));
        let id = new_session(&app).await;
        send_json(
            &app,
            "PATCH",
            &format!("/api/v1/sessions/{id}/answers"),
            Some(r#"{"field":"contact_name","value":"Jane"}"#),
        )
        .await;
        to_last_step(&app, &id).await;

        let (status, json) =
            send_json(&app, "POST", &format!("/api/v1/sessions/{id}/submit"), None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["errors"][0]["code"], "BACKEND_UNAVAILABLE");
        assert!(
            json["errors"][0]["message"]
                .as_str()
                .unwrap()
                .starts_with("service unavailable:")
        );

        let (_, json) = send_json(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(json["data"]["step"], 5);
        assert_eq!(json["data"]["answers"]["contact"]["name"], "Jane");
        assert_eq!(json["data"]["submission"]["state"], "failed");

        let (status, json) =
            send_json(&app, "GET", &format!("/api/v1/sessions/{id}/report"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["errors"][0]["code"], "REPORT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_backend_error_is_bad_gateway() {
        let app = build_router(mock_state(true, MockReply::Fail));
        let id = new_session(&app).await;
        to_last_step(&app, &id).await;

        let (status, json) =
            send_json(&app, "POST", &format!("/api/v1/sessions/{id}/submit"), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["errors"][0]["code"], "BACKEND_FAILURE");
    }

    #[tokio::test]
    async fn test_submit_and_fetch_report_verbatim() {
        let app = build_router(mock_state(true, MockReply::Markup(MARKUP.to_string())));
        let id = new_session(&app).await;
        to_last_step(&app, &id).await;

        let (status, json) =
            send_json(&app, "POST", &format!("/api/v1/sessions/{id}/submit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["markup"], MARKUP);
        assert_eq!(json["data"]["model"], "gpt-4");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/sessions/{id}/report"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(bytes, MARKUP.as_bytes());
    }

    #[tokio::test]
    async fn test_dropped_submit_still_records_report() {
        let reply = MockReply::Delayed(Duration::from_millis(200), MARKUP.to_string());
        let app = build_router(mock_state(true, reply));
        let id = new_session(&app).await;
        to_last_step(&app, &id).await;

        // The client gives up long before the backend answers.
        let submit_uri = format!("/api/v1/sessions/{id}/submit");
        let submit = send(&app, "POST", &submit_uri, None);
        assert!(tokio::time::timeout(Duration::from_millis(20), submit).await.is_err());

        let mut state = Value::Null;
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let (_, json) = send_json(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
            state = json["data"]["submission"]["state"].clone();
            if state != "in_flight" {
                break;
            }
        }
        assert_eq!(state, "completed");

        let (status, _) =
            send_json(&app, "POST", &format!("/api/v1/sessions/{id}/retreat"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&app, "GET", &format!("/api/v1/sessions/{id}/report"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, MARKUP);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let app = build_router(mock_state(false, MockReply::Fail));
        let id = new_session(&app).await;

        let (status, _) = send_json(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send_json(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
