//! Secret chain builder -- wires concrete providers in priority order.
//!
//! The resulting chain is passed to `SecretService` in `hollandbridge-core`
//! via the `DynSecretProvider` abstraction.

use std::path::Path;
use std::sync::Arc;

use hollandbridge_core::repository::secret::DynSecretProvider;

use crate::filesystem::secrets_path;
use crate::secret::env::EnvSecretProvider;
use crate::secret::file::FileSecretProvider;

/// Build the default secret resolution chain.
///
/// Ordered by precedence (first match wins):
/// 1. Environment variables
/// 2. `{data_dir}/secrets.toml`
pub fn build_secret_chain(data_dir: &Path) -> Vec<DynSecretProvider> {
    vec![
        Arc::new(EnvSecretProvider::new()),
        Arc::new(FileSecretProvider::new(secrets_path(data_dir))),
    ]
}
