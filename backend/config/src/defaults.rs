//! Config defaults: fills unset fields and normalizes values.

use crate::schema::{LoggingConfig, OcrBatchConfig};

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Image extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Console log level. Progress goes to stdout separately.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: OcrBatchConfig) -> OcrBatchConfig {
    let config = apply_language_defaults(config);
    let config = apply_extension_defaults(config);
    let config = apply_output_defaults(config);
    apply_logging_defaults(config)
}

/// Trim codes, drop blanks; fall back to the default language.
fn apply_language_defaults(mut config: OcrBatchConfig) -> OcrBatchConfig {
    let languages: Vec<String> = config
        .languages
        .take()
        .unwrap_or_default()
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    config.languages = Some(if languages.is_empty() {
        vec![DEFAULT_LANGUAGE.to_string()]
    } else {
        languages
    });
    config
}

/// Lowercase, strip leading dots, dedupe.
fn apply_extension_defaults(mut config: OcrBatchConfig) -> OcrBatchConfig {
    let mut extensions: Vec<String> = Vec::new();
    for ext in config.extensions.take().unwrap_or_default() {
        let ext = ext.trim().trim_start_matches('.').to_lowercase();
        if !ext.is_empty() && !extensions.contains(&ext) {
            extensions.push(ext);
        }
    }
    if extensions.is_empty() {
        extensions = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
    }
    config.extensions = Some(extensions);
    config
}

fn apply_output_defaults(mut config: OcrBatchConfig) -> OcrBatchConfig {
    config.output_format.get_or_insert_with(Default::default);
    config.fail_fast.get_or_insert(false);
    config
}

fn apply_logging_defaults(mut config: OcrBatchConfig) -> OcrBatchConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.as_deref().map_or(true, |l| l.trim().is_empty()) {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}
