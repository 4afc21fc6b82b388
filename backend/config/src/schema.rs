//! ocrbatch configuration schema.
//!
//! Every field is optional in the file; `defaults::apply_all_defaults`
//! fills the gaps and the accessors below read the merged values.

use std::path::PathBuf;

use ocrbatch_core::{FailurePolicy, LanguageSet, OutputFormat};
use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_EXTENSIONS, DEFAULT_LANGUAGE, DEFAULT_LOG_LEVEL};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OcrBatchConfig {
    /// Engine language codes, e.g. `[eng, deu]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,

    /// Accepted image extensions, without the dot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Result file format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    /// Abort the batch on the first per-file failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_fast: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract: Option<TesseractConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

/// Options forwarded to the `tesseract` binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TesseractConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi: Option<i32>,
    /// Page segmentation mode (0-13)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psm: Option<i32>,
    /// OCR engine mode (0-3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `ocrbatch_executor=debug`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON log files; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl OcrBatchConfig {
    pub fn language_set(&self) -> LanguageSet {
        self.languages
            .as_ref()
            .and_then(|codes| LanguageSet::new(codes.iter().cloned()))
            .unwrap_or_else(|| LanguageSet::single(DEFAULT_LANGUAGE))
    }

    pub fn extension_list(&self) -> Vec<String> {
        match &self.extensions {
            Some(exts) if !exts.is_empty() => exts.clone(),
            _ => DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.fail_fast.unwrap_or(false) {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::Continue
        }
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&PathBuf> {
        self.logging.as_ref().and_then(|l| l.dir.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_yaml() {
        let yaml = r#"
languages: [eng, deu]
extensions: [png, tiff]
output_format: yaml
fail_fast: true
tesseract:
  psm: 6
logging:
  level: debug
  dir: /var/log/ocrbatch
"#;
        let config: OcrBatchConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.language_set().joined(), "eng+deu");
        assert_eq!(config.extension_list(), vec!["png", "tiff"]);
        assert_eq!(config.output_format(), OutputFormat::Yaml);
        assert_eq!(config.failure_policy(), FailurePolicy::FailFast);
        assert_eq!(config.tesseract.as_ref().unwrap().psm, Some(6));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn empty_document_uses_fallbacks() {
        let config: OcrBatchConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.language_set(), LanguageSet::single("eng"));
        assert_eq!(config.failure_policy(), FailurePolicy::Continue);
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.log_dir().is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_yaml::from_str::<OcrBatchConfig>("langauges: [eng]").is_err());
    }
}
