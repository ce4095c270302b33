use thiserror::Error;

use crate::llm::LlmError;

/// Why a submission attempt produced no report.
///
/// Both variants are terminal for the current attempt only; the answers
/// that produced it are left untouched and the user may resubmit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// Missing credential or unreachable service.
    #[error("service unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend answered with an error, an empty reply, or timed out.
    #[error("generation failed: {0}")]
    BackendFailure(String),
}

impl From<LlmError> for SubmissionError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::AuthenticationFailed | LlmError::Unreachable(_) => {
                SubmissionError::BackendUnavailable(err.to_string())
            }
            other => SubmissionError::BackendFailure(other.to_string()),
        }
    }
}

/// Errors from session-level wizard operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,

    #[error("submission is only possible on the final step")]
    NotOnFinalStep,

    #[error("a submission is already in progress")]
    SubmissionInFlight,
}

/// Errors related to secret resolution.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret provider unavailable")]
    ProviderUnavailable,

    #[error("failed to read secrets: {0}")]
    Read(String),

    #[error("malformed secrets file: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_and_transport_errors_mean_unavailable() {
        assert!(matches!(
            SubmissionError::from(LlmError::AuthenticationFailed),
            SubmissionError::BackendUnavailable(_)
        ));
        assert!(matches!(
            SubmissionError::from(LlmError::Unreachable("dns".to_string())),
            SubmissionError::BackendUnavailable(_)
        ));
    }

    #[test]
    fn test_other_provider_errors_mean_failure() {
        let err = SubmissionError::from(LlmError::Provider {
            message: "500".to_string(),
        });
        assert_eq!(err, SubmissionError::BackendFailure("provider error: 500".to_string()));
        assert!(matches!(
            SubmissionError::from(LlmError::RateLimited { retry_after_ms: None }),
            SubmissionError::BackendFailure(_)
        ));
    }

    #[test]
    fn test_submission_error_display() {
        let err = SubmissionError::BackendUnavailable("OPENAI_API_KEY not configured".to_string());
        assert_eq!(err.to_string(), "service unavailable: OPENAI_API_KEY not configured");
    }

    #[test]
    fn test_session_error_display() {
        assert_eq!(SessionError::NotFound.to_string(), "session not found");
    }
}
