//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use hollandbridge_types::error::{SessionError, SubmissionError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Session(SessionError),
    Submission(SubmissionError),
    /// The session exists but has no successful report yet.
    ReportNotFound,
    /// Malformed path or body.
    Validation(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<SubmissionError> for AppError {
    fn from(e: SubmissionError) -> Self {
        AppError::Submission(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Session(SessionError::NotFound) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", "Session not found".to_string())
            }
            AppError::Session(e @ SessionError::NotOnFinalStep) => {
                (StatusCode::CONFLICT, "NOT_ON_FINAL_STEP", e.to_string())
            }
            AppError::Session(e @ SessionError::SubmissionInFlight) => {
                (StatusCode::CONFLICT, "SUBMISSION_IN_FLIGHT", e.to_string())
            }
            AppError::Submission(e @ SubmissionError::BackendUnavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "BACKEND_UNAVAILABLE", e.to_string())
            }
            AppError::Submission(e @ SubmissionError::BackendFailure(_)) => {
                (StatusCode::BAD_GATEWAY, "BACKEND_FAILURE", e.to_string())
            }
            AppError::ReportNotFound => (
                StatusCode::NOT_FOUND,
                "REPORT_NOT_FOUND",
                "No report has been generated for this session".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::warn!(code, %message, "request failed");
        }

        let body = ApiResponse::error(code, &message, Uuid::now_v7().to_string());
        (status, Json(body)).into_response()
    }
}
