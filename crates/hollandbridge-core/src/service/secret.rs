//! Secret resolution service.
//!
//! SecretService resolves secrets through a chain of providers in priority
//! order. Default precedence: environment > secrets file.
//!
//! This service lives in `hollandbridge-core` and depends only on
//! `hollandbridge-types` and the `DynSecretProvider` trait object.

use hollandbridge_types::error::SecretError;
use hollandbridge_types::secret::SecretSource;

use crate::repository::secret::DynSecretProvider;

/// Resolves secrets across multiple read-only backends.
///
/// Providers are ordered by precedence (first match wins).
pub struct SecretService {
    providers: Vec<DynSecretProvider>,
}

impl SecretService {
    /// Providers should be ordered by precedence (highest priority first).
    pub fn new(providers: Vec<DynSecretProvider>) -> Self {
        Self { providers }
    }

    /// Resolve a secret value. First provider with a value wins.
    pub async fn get_secret(&self, key: &str) -> Result<Option<String>, SecretError> {
        Ok(self.resolve(key).await?.map(|(value, _)| value))
    }

    /// Which provider would supply `key`, without returning the value.
    pub async fn locate(&self, key: &str) -> Result<Option<SecretSource>, SecretError> {
        Ok(self.resolve(key).await?.map(|(_, source)| source))
    }

    async fn resolve(&self, key: &str) -> Result<Option<(String, SecretSource)>, SecretError> {
        for provider in &self.providers {
            if let Some(value) = provider.get_boxed(key).await? {
                tracing::debug!(key, source = %provider.source(), "secret resolved");
                return Ok(Some((value, provider.source())));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for SecretService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretService")
            .field("providers", &self.providers.len())
            .finish()
    }
}
