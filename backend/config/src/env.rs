//! `OCRBATCH_*` environment overrides, applied on top of the config file.

use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::schema::{LoggingConfig, OcrBatchConfig};

pub const ENV_LANGS: &str = "OCRBATCH_LANGS";
pub const ENV_FORMAT: &str = "OCRBATCH_FORMAT";
pub const ENV_FAIL_FAST: &str = "OCRBATCH_FAIL_FAST";
pub const ENV_LOG_DIR: &str = "OCRBATCH_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "OCRBATCH_LOG_LEVEL";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: OcrBatchConfig) -> Result<OcrBatchConfig> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
///
/// Empty values are ignored.
pub fn apply_env_overrides_with(
    mut config: OcrBatchConfig,
    env: &HashMap<String, String>,
) -> Result<OcrBatchConfig> {
    let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(langs) = get(ENV_LANGS) {
        config.languages = Some(
            langs
                .split(['+', ','])
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
        );
    }

    if let Some(format) = get(ENV_FORMAT) {
        config.output_format = Some(format.parse().map_err(anyhow::Error::msg)?);
    }

    if let Some(flag) = get(ENV_FAIL_FAST) {
        config.fail_fast = Some(parse_bool(ENV_FAIL_FAST, flag)?);
    }

    if let Some(dir) = get(ENV_LOG_DIR) {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(dir.into());
    }

    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.to_string());
    }

    Ok(config)
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{var} must be a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocrbatch_core::OutputFormat;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn overrides_file_values() {
        let base = OcrBatchConfig {
            languages: Some(vec!["fra".into()]),
            ..Default::default()
        };
        let config = apply_env_overrides_with(
            base,
            &env(&[
                (ENV_LANGS, "eng+deu"),
                (ENV_FORMAT, "yaml"),
                (ENV_FAIL_FAST, "yes"),
                (ENV_LOG_DIR, "/tmp/logs"),
            ]),
        )
        .unwrap();

        assert_eq!(config.languages, Some(vec!["eng".to_string(), "deu".to_string()]));
        assert_eq!(config.output_format, Some(OutputFormat::Yaml));
        assert_eq!(config.fail_fast, Some(true));
        assert_eq!(config.log_dir().unwrap().to_str(), Some("/tmp/logs"));
    }

    #[test]
    fn comma_separated_languages() {
        let config =
            apply_env_overrides_with(OcrBatchConfig::default(), &env(&[(ENV_LANGS, "eng, jpn")])).unwrap();
        assert_eq!(config.languages, Some(vec!["eng".to_string(), "jpn".to_string()]));
    }

    #[test]
    fn empty_values_are_ignored() {
        let config =
            apply_env_overrides_with(OcrBatchConfig::default(), &env(&[(ENV_FORMAT, " ")])).unwrap();
        assert_eq!(config, OcrBatchConfig::default());
    }

    #[test]
    fn bad_boolean_is_an_error() {
        let err = apply_env_overrides_with(OcrBatchConfig::default(), &env(&[(ENV_FAIL_FAST, "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_FAIL_FAST));
    }

    #[test]
    fn bad_format_is_an_error() {
        assert!(apply_env_overrides_with(OcrBatchConfig::default(), &env(&[(ENV_FORMAT, "xml")])).is_err());
    }
}
