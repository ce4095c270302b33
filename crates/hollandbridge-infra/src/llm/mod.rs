//! Generation provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait
//! defined in `hollandbridge-core`, and a factory ([`create_provider`]) that
//! builds it from the resolved credential and backend configuration.
//!
//! [`LlmProvider`]: hollandbridge_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use hollandbridge_core::llm::box_provider::BoxLlmProvider;
use hollandbridge_types::config::BackendConfig;

use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] for the configured backend.
///
/// The key must already be resolved; nothing here reads secrets.
pub fn create_provider(config: &BackendConfig, api_key: SecretString) -> BoxLlmProvider {
    tracing::debug!(base_url = %config.base_url, "creating generation provider");
    BoxLlmProvider::new(OpenAiCompatibleProvider::openai(api_key, &config.base_url))
}
