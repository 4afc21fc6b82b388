//! Result Writer
//!
//! Serializes one `OcrResult` per image into the output directory as
//! `<base_name>_ocr.<ext>`.

use std::path::{Path, PathBuf};

use ocrbatch_core::{OcrBatchError, OcrResult, OutputFormat};
use tokio::fs;
use tracing::debug;

/// Suffix appended to the image base name.
const OUTPUT_SUFFIX: &str = "_ocr";

pub struct ResultWriter {
    output_dir: PathBuf,
    format: OutputFormat,
}

impl ResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Target path for the result of `image_file` (`photo.PNG` -> `photo_ocr.json`).
    pub fn output_path_for(&self, image_file: &str) -> PathBuf {
        let base = Path::new(image_file)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(image_file);
        self.output_dir
            .join(format!("{base}{OUTPUT_SUFFIX}.{}", self.format.extension()))
    }

    /// Create the output directory and its parents. Idempotent.
    pub async fn prepare(&self) -> Result<(), OcrBatchError> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| OcrBatchError::Write {
                path: self.output_dir.clone(),
                source,
            })
    }

    /// Render the on-disk representation of a result.
    ///
    /// JSON is pretty-printed with two-space indentation and keeps
    /// non-ASCII characters literal.
    pub fn render(&self, result: &OcrResult) -> Result<String, OcrBatchError> {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(result).map_err(|e| e.to_string()),
            OutputFormat::Yaml => serde_yaml::to_string(result).map_err(|e| e.to_string()),
        };
        rendered.map_err(|message| OcrBatchError::Serialization {
            file: result.image_file.clone(),
            message,
        })
    }

    /// Write a result, replacing any previous file of the same name.
    ///
    /// Content goes to a temp file first and is renamed into place.
    pub async fn write(&self, result: &OcrResult) -> Result<PathBuf, OcrBatchError> {
        self.prepare().await?;

        let path = self.output_path_for(&result.image_file);
        let body = self.render(result)?;

        let tmp_path = path.with_extension(format!("{}.tmp", self.format.extension()));
        if let Err(source) = fs::write(&tmp_path, body.as_bytes()).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(OcrBatchError::Write {
                path: tmp_path,
                source,
            });
        }

        if let Err(source) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(OcrBatchError::Write { path, source });
        }

        debug!(path = %path.display(), lines = result.extracted_text.len(), "Wrote OCR result");
        Ok(path)
    }
}
