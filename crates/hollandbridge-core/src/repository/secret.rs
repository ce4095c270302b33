//! Secret provider trait definition.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use hollandbridge_types::error::SecretError;
use hollandbridge_types::secret::SecretSource;

/// Trait for read-only secret backends (environment, secrets file).
///
/// The `SecretService` chains several providers in priority order.
pub trait SecretProvider: Send + Sync {
    /// Where values from this provider come from.
    fn source(&self) -> SecretSource;

    /// Retrieve a secret value by key.
    /// Returns None if the secret does not exist in this provider.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, SecretError>> + Send;
}

/// Object-safe version of [`SecretProvider`] with boxed futures.
pub trait SecretProviderDyn: Send + Sync {
    fn source(&self) -> SecretSource;

    fn get_boxed<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, SecretError>> + Send + 'a>>;
}

impl<T: SecretProvider> SecretProviderDyn for T {
    fn source(&self) -> SecretSource {
        SecretProvider::source(self)
    }

    fn get_boxed<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, SecretError>> + Send + 'a>> {
        Box::pin(self.get(key))
    }
}

/// Shared, type-erased secret provider.
pub type DynSecretProvider = Arc<dyn SecretProviderDyn>;
