//! Final-step submission: prompt in, report markup out.
//!
//! `InsightService` builds the outbound request from a frozen answer
//! snapshot, makes exactly one backend call, and classifies the outcome as
//! a report, `BackendUnavailable`, or `BackendFailure`. It never touches the
//! live answers.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hollandbridge_types::error::SubmissionError;
use hollandbridge_types::llm::{CompletionRequest, StopReason, Usage};
use serde::Serialize;
use tracing::{Instrument, debug, info_span, warn};

use crate::llm::box_provider::BoxLlmProvider;
use crate::prompt::build_insights_prompt;
use crate::wizard::state::AnswerSnapshot;

/// The generated report, passed through for display without inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightReport {
    /// Markup exactly as returned by the backend. Trusted, not escaped.
    pub markup: String,
    pub model: String,
    pub usage: Usage,
    pub generated_at: DateTime<Utc>,
}

/// Runs generation calls with a fixed model and temperature.
#[derive(Debug, Clone)]
pub struct InsightService {
    timeout: Duration,
}

impl InsightService {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn build_request(answers: &AnswerSnapshot) -> CompletionRequest {
        CompletionRequest::insights(build_insights_prompt(answers))
    }

    /// Generate a report for a snapshot.
    pub async fn generate(
        &self,
        provider: &BoxLlmProvider,
        answers: &AnswerSnapshot,
    ) -> Result<InsightReport, SubmissionError> {
        let request = Self::build_request(answers);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.temperature = request.temperature,
            gen_ai.request.stream = false,
        );

        let call = provider.complete(&request).instrument(span);
        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "generation call timed out");
                return Err(SubmissionError::BackendFailure(format!(
                    "no response within {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        if response.content.trim().is_empty() {
            return Err(SubmissionError::BackendFailure(
                "backend returned an empty reply".to_string(),
            ));
        }

        if response.stop_reason != StopReason::EndTurn {
            warn!(stop_reason = %response.stop_reason, "report may be incomplete");
        }

        debug!(
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "insights generated"
        );

        Ok(InsightReport {
            markup: response.content,
            model: response.model,
            usage: response.usage,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    use hollandbridge_types::answers::{AnswerRecord, AnswerUpdate};
    use hollandbridge_types::llm::{CompletionResponse, LlmError};

    use crate::llm::provider::LlmProvider;

    #[derive(Clone)]
    enum Reply {
        Text(String),
        Auth,
        Unreachable,
        Server,
        Hang,
    }

    struct MockProvider {
        reply: Reply,
        seen: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl MockProvider {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn complete(
            &self,
            request: &CompletionRequest,
        ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
            self.seen.lock().unwrap().push(request.clone());
            let reply = self.reply.clone();
            async move {
                match reply {
                    Reply::Text(content) => Ok(CompletionResponse {
                        id: "resp-1".to_string(),
                        content,
                        model: "gpt-4".to_string(),
                        stop_reason: StopReason::EndTurn,
                        usage: Usage {
                            input_tokens: 10,
                            output_tokens: 20,
                        },
                    }),
                    Reply::Auth => Err(LlmError::AuthenticationFailed),
                    Reply::Unreachable => Err(LlmError::Unreachable("connection refused".into())),
                    Reply::Server => Err(LlmError::Provider {
                        message: "HTTP 500".to_string(),
                    }),
                    Reply::Hang => {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        Err(LlmError::Overloaded("late".to_string()))
                    }
                }
            }
        }
    }

    fn snapshot() -> AnswerSnapshot {
        let mut record = AnswerRecord::default();
        record.apply(AnswerUpdate::ContactName("Jane Doe".to_string()));
        AnswerSnapshot::from(record)
    }

    fn service() -> InsightService {
        InsightService::new(Duration::from_secs(5))
    }

    #[test]
    fn test_request_uses_fixed_parameters() {
        let request = InsightService::build_request(&snapshot());
        assert_eq!(request.model, "gpt-4");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.prompt, build_insights_prompt(&snapshot()));
    }

    #[tokio::test]
    async fn test_reply_is_passed_through_verbatim() {
        let markup = "<h1> The Holland Bridge </h1>\n<b> Trend </b>".to_string();
        let provider = BoxLlmProvider::new(MockProvider::new(Reply::Text(markup.clone())));

        let report = service().generate(&provider, &snapshot()).await.unwrap();

        assert_eq!(report.markup, markup);
        assert_eq!(report.model, "gpt-4");
        assert_eq!(report.usage.output_tokens, 20);
    }

    #[tokio::test]
    async fn test_one_call_per_submission() {
        let mock = MockProvider::new(Reply::Text("ok".to_string()));
        let seen = mock.seen.clone();
        let provider = BoxLlmProvider::new(mock);

        service().generate(&provider, &snapshot()).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].prompt.contains("1. First Name: Jane Doe<br>"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_failure() {
        let provider = BoxLlmProvider::new(MockProvider::new(Reply::Text("  \n".to_string())));
        let err = service().generate(&provider, &snapshot()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::BackendFailure(_)));
    }

    #[tokio::test]
    async fn test_auth_and_transport_errors_are_unavailable() {
        for reply in [Reply::Auth, Reply::Unreachable] {
            let provider = BoxLlmProvider::new(MockProvider::new(reply));
            let err = service().generate(&provider, &snapshot()).await.unwrap_err();
            assert!(matches!(err, SubmissionError::BackendUnavailable(_)));
        }
    }

    #[tokio::test]
    async fn test_server_error_is_failure() {
        let provider = BoxLlmProvider::new(MockProvider::new(Reply::Server));
        let err = service().generate(&provider, &snapshot()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::BackendFailure(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let provider = BoxLlmProvider::new(MockProvider::new(Reply::Hang));
        let service = InsightService::new(Duration::from_millis(20));
        let err = service.generate(&provider, &snapshot()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::BackendFailure(_)));
    }
}
