//! Environment variable secret provider.
//!
//! The highest-priority provider in the resolution chain: an environment
//! variable named exactly like the key overrides every other backend.

use hollandbridge_core::repository::secret::SecretProvider;
use hollandbridge_types::error::SecretError;
use hollandbridge_types::secret::SecretSource;

/// Reads secrets from process environment variables.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for EnvSecretProvider {
    fn source(&self) -> SecretSource {
        SecretSource::Environment
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match std::env::var(key) {
            Ok(val) if val.trim().is_empty() => Ok(None),
            Ok(val) => Ok(Some(val)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            // Not valid Unicode; secrets must be valid strings.
            Err(std::env::VarError::NotUnicode(_)) => Ok(None),
        }
    }
}
