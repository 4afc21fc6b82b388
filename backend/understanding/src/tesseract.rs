//! Tesseract-backed OCR engine.
//!
//! Drives the `tesseract` binary through `rusty-tesseract`. Recognition is
//! word-level; words are joined back into one string per detected line.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use image::{ImageFormat, ImageReader};
use ocrbatch_core::{LanguageSet, OcrBatchError, OcrEngine};
use rusty_tesseract::{Args, Image};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const ENGINE_NAME: &str = "tesseract";

/// Tesseract row level for single words in TSV output.
const WORD_LEVEL: i32 = 5;

/// Tunables passed to every `tesseract` invocation. `None` keeps the
/// `rusty-tesseract` default.
#[derive(Debug, Clone, Default)]
pub struct TesseractOptions {
    pub dpi: Option<i32>,
    pub psm: Option<i32>,
    pub oem: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    options: TesseractOptions,
}

impl TesseractEngine {
    pub fn new(options: TesseractOptions) -> Self {
        Self { options }
    }

    fn args(&self, languages: &LanguageSet) -> Args {
        let defaults = Args::default();
        Args {
            lang: languages.joined(),
            config_variables: HashMap::from([("tessedit_create_tsv".into(), "1".into())]),
            dpi: self.options.dpi.or(defaults.dpi),
            psm: self.options.psm.or(defaults.psm),
            oem: self.options.oem.or(defaults.oem),
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    async fn initialize(&self, languages: &LanguageSet) -> Result<(), OcrBatchError> {
        let wanted = languages.codes().to_vec();

        let (version, installed) = tokio::task::spawn_blocking(move || {
            let version = rusty_tesseract::get_tesseract_version().map_err(unavailable)?;
            let installed = rusty_tesseract::get_tesseract_langs().map_err(unavailable)?;
            Ok::<_, OcrBatchError>((version, installed))
        })
        .await
        .map_err(|e| OcrBatchError::Other(anyhow::anyhow!("tesseract probe panicked: {e}")))??;

        let missing: Vec<&String> = wanted.iter().filter(|l| !installed.contains(l)).collect();
        if !missing.is_empty() {
            return Err(OcrBatchError::EngineUnavailable {
                engine: ENGINE_NAME.into(),
                message: format!(
                    "language data not installed: {} (available: {})",
                    missing.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", "),
                    installed.join(", ")
                ),
            });
        }

        info!(version = %version.trim(), "Tesseract available");
        Ok(())
    }

    async fn recognize(
        &self,
        image_path: &Path,
        languages: &LanguageSet,
    ) -> Result<Vec<String>, OcrBatchError> {
        let args = self.args(languages);
        let path = image_path.to_path_buf();

        tokio::task::spawn_blocking(move || recognize_blocking(&path, &args))
            .await
            .map_err(|e| OcrBatchError::Other(anyhow::anyhow!("tesseract worker panicked: {e}")))?
    }
}

fn recognize_blocking(path: &Path, args: &Args) -> Result<Vec<String>, OcrBatchError> {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let engine_error = |message: String| OcrBatchError::OcrEngine {
        file: file.clone(),
        message,
    };

    // Reject unreadable or corrupt files before spawning tesseract.
    let (kind, width, height) = inspect_image(path).map_err(engine_error)?;
    debug!(file = %file, format = ?kind, width, height, "Decoded image header");

    let staged = stage_for_tesseract(path, kind)
        .map_err(|e| engine_error(format!("cannot stage image: {e}")))?;
    let source = staged.as_ref().map_or(path, |f| f.path());

    let image = Image::from_path(source).map_err(|e| engine_error(e.to_string()))?;
    let output = rusty_tesseract::image_to_data(&image, args).map_err(|e| engine_error(e.to_string()))?;

    let words: Vec<WordBox> = output
        .data
        .iter()
        .filter(|row| row.level == WORD_LEVEL)
        .map(|row| WordBox {
            page: row.page_num,
            block: row.block_num,
            paragraph: row.par_num,
            line: row.line_num,
            text: row.text.clone(),
        })
        .collect();

    Ok(assemble_lines(&words))
}

/// Format and dimensions, with the format sniffed from content.
fn inspect_image(path: &Path) -> Result<(ImageFormat, u32, u32), String> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| format!("unreadable image: {e}"))?;
    let kind = reader
        .format()
        .ok_or_else(|| "unrecognized image format".to_string())?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| format!("unreadable image: {e}"))?;
    Ok((kind, width, height))
}

/// Copy the image to a temp file named after its real format when its own
/// name does not carry a matching extension. rusty-tesseract picks the
/// format from the extension and refuses names such as `.png`.
fn stage_for_tesseract(path: &Path, kind: ImageFormat) -> std::io::Result<Option<NamedTempFile>> {
    let accepted = kind.extensions_str();
    let current = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    if current.as_deref().is_some_and(|ext| accepted.iter().any(|a| *a == ext)) {
        return Ok(None);
    }
    let Some(ext) = accepted.first() else {
        return Ok(None);
    };

    let staged = tempfile::Builder::new()
        .prefix("ocrbatch-")
        .suffix(&format!(".{ext}"))
        .tempfile()?;
    std::fs::copy(path, staged.path())?;
    Ok(Some(staged))
}

fn unavailable(err: impl std::fmt::Display) -> OcrBatchError {
    OcrBatchError::EngineUnavailable {
        engine: ENGINE_NAME.into(),
        message: err.to_string(),
    }
}

/// One recognized word and the line it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBox {
    pub page: i32,
    pub block: i32,
    pub paragraph: i32,
    pub line: i32,
    pub text: String,
}

impl WordBox {
    fn line_key(&self) -> (i32, i32, i32, i32) {
        (self.page, self.block, self.paragraph, self.line)
    }
}

/// Join consecutive words sharing a line into one string each.
///
/// Keeps engine order. Blank words are dropped and never start a line.
pub fn assemble_lines(words: &[WordBox]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<(i32, i32, i32, i32)> = None;

    for word in words {
        let text = word.text.trim();
        if text.is_empty() {
            continue;
        }
        let key = word.line_key();
        match lines.last_mut() {
            Some(line) if current == Some(key) => {
                line.push(' ');
                line.push_str(text);
            }
            _ => {
                lines.push(text.to_string());
                current = Some(key);
            }
        }
    }

    lines
}
