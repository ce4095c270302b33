//! Application state wiring all services together.
//!
//! AppState holds the service instances used by both the CLI and the REST
//! API. The generation provider is built per submission, after the
//! credential has been resolved, so a missing key only ever fails the
//! submit step.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use hollandbridge_core::llm::box_provider::BoxLlmProvider;
use hollandbridge_core::service::secret::SecretService;
use hollandbridge_core::submission::{InsightReport, InsightService};
use hollandbridge_core::wizard::registry::SessionRegistry;
use hollandbridge_core::wizard::state::AnswerSnapshot;
use hollandbridge_infra::config::load_global_config;
use hollandbridge_infra::filesystem::resolve_data_dir;
use hollandbridge_infra::llm::create_provider;
use hollandbridge_infra::secret::chain::build_secret_chain;
use hollandbridge_types::config::{BackendConfig, GlobalConfig};
use hollandbridge_types::error::SubmissionError;
use hollandbridge_types::secret::OPENAI_API_KEY;

/// Builds a provider once the credential is known.
pub type ProviderFactory = Arc<dyn Fn(&BackendConfig, SecretString) -> BoxLlmProvider + Send + Sync>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
    pub secret_service: Arc<SecretService>,
    pub sessions: SessionRegistry,
    pub insights: InsightService,
    provider_factory: ProviderFactory,
}

impl AppState {
    /// Initialize the application state: load config, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_global_config(&data_dir).await;
        tracing::debug!(data_dir = %data_dir.display(), "configuration loaded");

        let secret_service = SecretService::new(build_secret_chain(&data_dir));

        Ok(Self::new(
            config,
            data_dir,
            secret_service,
            Arc::new(create_provider),
        ))
    }

    pub fn new(
        config: GlobalConfig,
        data_dir: PathBuf,
        secret_service: SecretService,
        provider_factory: ProviderFactory,
    ) -> Self {
        let insights = InsightService::new(Duration::from_secs(config.backend.timeout_secs));
        Self {
            config: Arc::new(config),
            data_dir,
            secret_service: Arc::new(secret_service),
            sessions: SessionRegistry::new(),
            insights,
            provider_factory,
        }
    }

    /// Resolve the credential and build the generation provider.
    ///
    /// A missing or unreadable credential is `BackendUnavailable`.
    pub async fn provider(&self) -> Result<BoxLlmProvider, SubmissionError> {
        let key = self
            .secret_service
            .get_secret(OPENAI_API_KEY)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "credential lookup failed");
                SubmissionError::BackendUnavailable(format!("could not read {OPENAI_API_KEY}: {e}"))
            })?
            .ok_or_else(|| {
                SubmissionError::BackendUnavailable(format!("{OPENAI_API_KEY} is not configured"))
            })?;

        Ok((self.provider_factory)(&self.config.backend, SecretString::from(key)))
    }

    /// Run one generation call for a frozen set of answers.
    pub async fn generate(&self, answers: &AnswerSnapshot) -> Result<InsightReport, SubmissionError> {
        let provider = self.provider().await?;
        self.insights.generate(&provider, answers).await
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use hollandbridge_types::answers::AnswerRecord;

    #[tokio::test]
    async fn test_missing_key_is_unavailable() {
        let state = mock_state(false, MockReply::Markup("<b>x</b>".to_string()));
        let err = state
            .generate(&AnswerSnapshot::from(AnswerRecord::default()))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SubmissionError::BackendUnavailable("OPENAI_API_KEY is not configured".to_string())
        );
        assert_eq!(
            err.to_string(),
            "service unavailable: OPENAI_API_KEY is not configured"
        );
    }

    #[tokio::test]
    async fn test_generate_with_key() {
        let state = mock_state(true, MockReply::Markup("<b>x</b>".to_string()));
        let report = state
            .generate(&AnswerSnapshot::from(AnswerRecord::default()))
            .await
            .unwrap();
        assert_eq!(report.markup, "<b>x</b>");
        assert_eq!(report.model, "gpt-4");
    }

    #[tokio::test]
    async fn test_backend_error_is_failure() {
        let state = mock_state(true, MockReply::Fail);
        let err = state
            .generate(&AnswerSnapshot::from(AnswerRecord::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::BackendFailure(_)));
    }
}
