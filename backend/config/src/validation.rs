//! Config validation: field checks with user-friendly error messages.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::schema::OcrBatchConfig;

/// Tesseract language code (`eng`, `chi_sim`, `script_latin` ...).
static LANGUAGE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// Extension without dot.
static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]+$").unwrap());

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &OcrBatchConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_languages(config, &mut report);
    validate_extensions(config, &mut report);
    validate_tesseract(config, &mut report);
    report
}

fn validate_languages(config: &OcrBatchConfig, report: &mut ValidationReport) {
    let Some(languages) = &config.languages else { return };
    if languages.is_empty() {
        report.error("languages", "At least one language code is required");
    }
    for (i, code) in languages.iter().enumerate() {
        if !LANGUAGE_CODE.is_match(code) {
            report.error(
                format!("languages[{i}]"),
                format!("'{code}' is not a valid Tesseract language code"),
            );
        }
    }
}

fn validate_extensions(config: &OcrBatchConfig, report: &mut ValidationReport) {
    let Some(extensions) = &config.extensions else { return };
    if extensions.is_empty() {
        report.error("extensions", "At least one image extension is required");
    }
    for (i, ext) in extensions.iter().enumerate() {
        if !EXTENSION.is_match(ext) {
            report.error(
                format!("extensions[{i}]"),
                format!("'{ext}' must be a lowercase extension without a dot"),
            );
        } else if !matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" | "gif" | "webp" | "pbm" | "pgm" | "ppm") {
            report.warn(
                format!("extensions[{i}]"),
                format!("'{ext}' is not an image format Tesseract is known to read"),
            );
        }
    }
}

fn validate_tesseract(config: &OcrBatchConfig, report: &mut ValidationReport) {
    let Some(tess) = &config.tesseract else { return };
    if let Some(psm) = tess.psm {
        if !(0..=13).contains(&psm) {
            report.error("tesseract.psm", format!("Page segmentation mode {psm} is outside 0-13"));
        }
    }
    if let Some(oem) = tess.oem {
        if !(0..=3).contains(&oem) {
            report.error("tesseract.oem", format!("Engine mode {oem} is outside 0-3"));
        }
    }
    if let Some(dpi) = tess.dpi {
        if dpi <= 0 {
            report.error("tesseract.dpi", "DPI must be positive");
        } else if dpi < 70 {
            report.warn("tesseract.dpi", format!("DPI {dpi} is very low; recognition quality will suffer"));
        }
    }
}
