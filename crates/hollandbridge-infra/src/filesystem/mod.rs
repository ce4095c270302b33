//! Data directory layout and small file helpers.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HOLLANDBRIDGE_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `HOLLANDBRIDGE_DATA_DIR` environment variable
/// 2. `~/.hollandbridge`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".hollandbridge");
    }

    // Last resort: current directory
    PathBuf::from(".hollandbridge")
}

/// `{data_dir}/config.toml`
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// `{data_dir}/secrets.toml`
pub fn secrets_path(data_dir: &Path) -> PathBuf {
    data_dir.join("secrets.toml")
}

/// Write `content` to `path`, creating parent directories first.
pub async fn write_file(path: &Path, content: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await
}
