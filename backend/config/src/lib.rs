//! `ocrbatch-config` — layered configuration for ocrbatch.
//!
//! Provides:
//! - Typed config schema (languages, extensions, output, engine, logging)
//! - YAML loading from `$OCRBATCH_CONFIG` or `~/.ocrbatch/config.yaml`
//! - `OCRBATCH_*` environment overrides
//! - Default value application
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with};
pub use io::{config_dir, config_file_path, load_config, resolve_config_path};
pub use schema::{LoggingConfig, OcrBatchConfig, TesseractConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};

/// Load the config file, apply env overrides and defaults, then validate.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare() -> Result<OcrBatchConfig> {
    let path = resolve_config_path();
    let config = load_config(&path).await?;
    let config = apply_env_overrides(config)?;
    prepare(config)
}

/// Apply defaults and validate an already-merged config.
pub fn prepare(config: OcrBatchConfig) -> Result<OcrBatchConfig> {
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if !report.is_valid() {
        let messages: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
        bail!(ocrbatch_core::OcrBatchError::Config(messages.join("; ")));
    }

    Ok(config)
}
