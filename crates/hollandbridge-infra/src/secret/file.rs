//! `secrets.toml` secret provider.
//!
//! Keys of the form `{NAME}_API_KEY` live in a `[{name}]` table under
//! `api_key`; any other key is looked up at the top level:
//!
//! ```toml
//! [openai]
//! api_key = "sk-..."
//! ```
//!
//! The file is read on every lookup, so edits apply to the next submission
//! without a restart.

use std::path::{Path, PathBuf};

use hollandbridge_core::repository::secret::SecretProvider;
use hollandbridge_types::error::SecretError;
use hollandbridge_types::secret::SecretSource;

/// Reads secrets from a TOML file.
pub struct FileSecretProvider {
    path: PathBuf,
}

impl FileSecretProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Where `key` lives inside the file: `(table, field)`.
fn file_location(key: &str) -> (Option<String>, String) {
    match key.strip_suffix("_API_KEY") {
        Some(name) if !name.is_empty() => (Some(name.to_lowercase()), "api_key".to_string()),
        _ => (None, key.to_string()),
    }
}

impl SecretProvider for FileSecretProvider {
    fn source(&self) -> SecretSource {
        SecretSource::SecretsFile
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(SecretError::Read(format!("{}: {err}", self.path.display())));
            }
        };

        let doc: toml::Table = toml::from_str(&content)
            .map_err(|e| SecretError::Parse(format!("{}: {e}", self.path.display())))?;

        let (table, field) = file_location(key);
        let value = match table {
            Some(table) => doc
                .get(&table)
                .and_then(|t| t.as_table())
                .and_then(|t| t.get(&field)),
            None => doc.get(&field),
        };

        match value {
            None => Ok(None),
            Some(toml::Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(SecretError::Parse(format!("{key} must be a string"))),
        }
    }
}
