//! Secret metadata types. Secret values themselves never appear here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credential key for the generation backend.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Where a resolved secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretSource {
    /// Process environment variable.
    Environment,
    /// `secrets.toml` in the data directory.
    SecretsFile,
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::Environment => write!(f, "environment"),
            SecretSource::SecretsFile => write!(f, "secrets file"),
        }
    }
}
