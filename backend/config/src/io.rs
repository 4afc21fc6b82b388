//! Config file discovery and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use crate::schema::OcrBatchConfig;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the ocrbatch config directory.
/// Priority: `OCRBATCH_CONFIG_DIR` env > `~/.ocrbatch/` > `./.ocrbatch/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("OCRBATCH_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".ocrbatch");
    }
    PathBuf::from(".ocrbatch")
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// `OCRBATCH_CONFIG` if set, otherwise the file inside `config_dir()`.
pub fn resolve_config_path() -> PathBuf {
    match std::env::var("OCRBATCH_CONFIG") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => config_file_path(&config_dir()),
    }
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(path: &Path) -> Result<OcrBatchConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(OcrBatchConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if raw.trim().is_empty() {
        return Ok(OcrBatchConfig::default());
    }

    let config: OcrBatchConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}
