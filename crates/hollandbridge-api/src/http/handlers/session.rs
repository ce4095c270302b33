//! Wizard session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions                - Start a session on step 1
//! - GET    /api/v1/sessions/{id}           - Step, answers, submission status
//! - DELETE /api/v1/sessions/{id}           - Discard a session
//! - POST   /api/v1/sessions/{id}/advance   - Next step (clamped)
//! - POST   /api/v1/sessions/{id}/retreat   - Previous step (clamped)
//! - PATCH  /api/v1/sessions/{id}/answers   - Apply one typed answer update
//! - GET    /api/v1/sessions/{id}/prompt    - The payload that would be sent
//! - POST   /api/v1/sessions/{id}/submit    - Generate the report
//! - GET    /api/v1/sessions/{id}/report    - Last report as raw HTML

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use hollandbridge_core::submission::InsightReport;
use hollandbridge_core::wizard::registry::SessionView;
use hollandbridge_types::answers::{AnswerUpdate, UpdateOutcome};
use hollandbridge_types::error::SubmissionError;

use crate::http::error::AppError;
use crate::http::response::{session_links, ApiResponse};
use crate::state::AppState;

/// Result of a `PATCH .../answers` call.
#[derive(Debug, Serialize)]
pub struct UpdateResult {
    pub outcome: UpdateOutcome,
    pub session: SessionView,
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<SessionView>>) {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let view = state.sessions.create();
    let id = view.id.to_string();

    let resp = session_links(ApiResponse::success(view, request_id, elapsed_ms(start)), &id);
    (StatusCode::CREATED, Json(resp))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let view = state.sessions.view(parse_uuid(&id)?)?;

    Ok(Json(session_links(
        ApiResponse::success(view, request_id, elapsed_ms(start)),
        &id,
    )))
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state.sessions.remove(parse_uuid(&id)?)?;

    Ok(Json(ApiResponse::success(
        serde_json::json!({ "deleted": true, "id": id }),
        request_id,
        elapsed_ms(start),
    )))
}

/// POST /api/v1/sessions/{id}/advance
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let view = state.sessions.advance(parse_uuid(&id)?)?;

    Ok(Json(session_links(
        ApiResponse::success(view, request_id, elapsed_ms(start)),
        &id,
    )))
}

/// POST /api/v1/sessions/{id}/retreat
pub async fn retreat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SessionView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let view = state.sessions.retreat(parse_uuid(&id)?)?;

    Ok(Json(session_links(
        ApiResponse::success(view, request_id, elapsed_ms(start)),
        &id,
    )))
}

/// PATCH /api/v1/sessions/{id}/answers
///
/// A refused selection (`cap_reached`) is still a 200: the outcome is the
/// answer, and the session is returned unchanged.
pub async fn update_answers(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<AnswerUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<UpdateResult>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = parse_uuid(&id)?;
    let Json(update) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let outcome = state.sessions.apply(session_id, update)?;
    let session = state.sessions.view(session_id)?;

    Ok(Json(session_links(
        ApiResponse::success(UpdateResult { outcome, session }, request_id, elapsed_ms(start)),
        &id,
    )))
}

/// GET /api/v1/sessions/{id}/prompt
pub async fn get_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let prompt = state.sessions.prompt(parse_uuid(&id)?)?;

    Ok(Json(ApiResponse::success(
        serde_json::json!({ "prompt": prompt }),
        request_id,
        elapsed_ms(start),
    )))
}

/// POST /api/v1/sessions/{id}/submit
///
/// The registry entry is only locked to take the snapshot and to record the
/// result; the backend call itself runs without holding it.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<InsightReport>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = parse_uuid(&id)?;
    let snapshot = state.sessions.begin_submission(session_id)?;

    // The call runs detached so a dropped client cannot strand the session
    // in flight; the task always records the outcome itself.
    let task_state = state.clone();
    let handle = tokio::spawn(async move {
        let result = task_state.generate(&snapshot).await;
        task_state.sessions.finish_submission(session_id, &result);
        result
    });

    let report = match handle.await {
        Ok(result) => result?,
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "generation task failed");
            let err = SubmissionError::BackendFailure(format!("generation task failed: {e}"));
            state.sessions.finish_submission(session_id, &Err(err.clone()));
            return Err(err.into());
        }
    };

    tracing::info!(session_id = %session_id, model = %report.model, "report generated");

    Ok(Json(
        ApiResponse::success(report, request_id, elapsed_ms(start))
            .with_link("report", &format!("/api/v1/sessions/{id}/report")),
    ))
}

/// GET /api/v1/sessions/{id}/report
///
/// The markup is served exactly as the backend returned it.
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let report = state
        .sessions
        .report(parse_uuid(&id)?)?
        .ok_or(AppError::ReportNotFound)?;
    Ok(Html(report.markup))
}
