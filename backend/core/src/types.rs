use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One image file queued for text extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTask {
    /// File name as it appears in the input directory.
    pub file_name: String,
    pub absolute_path: PathBuf,
}

impl ImageTask {
    pub fn new(file_name: impl Into<String>, absolute_path: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            absolute_path: absolute_path.into(),
        }
    }

    /// File name without its final extension (`photo.PNG` -> `photo`).
    pub fn base_name(&self) -> &str {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.file_name)
    }
}

/// Recognized text for a single image. This is the on-disk record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrResult {
    pub image_file: String,
    pub extracted_text: Vec<String>,
}

/// Ordered, non-empty set of engine language codes (e.g., `eng`, `chi_sim`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageSet(Vec<String>);

impl LanguageSet {
    pub fn single(code: impl Into<String>) -> Self {
        Self(vec![code.into()])
    }

    /// Build a set from codes, dropping blanks and duplicates.
    /// Returns `None` if nothing remains.
    pub fn new<I, S>(codes: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for code in codes {
            let code = code.into().trim().to_string();
            if !code.is_empty() && !out.contains(&code) {
                out.push(code);
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(Self(out))
        }
    }

    pub fn codes(&self) -> &[String] {
        &self.0
    }

    /// Codes joined the way Tesseract expects them (`eng+deu`).
    pub fn joined(&self) -> String {
        self.0.join("+")
    }
}

impl Default for LanguageSet {
    fn default() -> Self {
        Self::single("eng")
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Serialization format of result files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{other}' (expected json or yaml)")),
        }
    }
}

/// What the orchestrator does when a single file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure, record it, move on to the next file.
    #[default]
    Continue,
    /// Abort the batch on the first failure.
    FailFast,
}
