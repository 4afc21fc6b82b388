use std::path::Path;

use async_trait::async_trait;

use crate::error::OcrBatchError;
use crate::types::LanguageSet;

/// A text-recognition backend.
///
/// Engines are constructed explicitly and handed to the OCR adapter, which
/// guarantees `initialize` completes once before the first `recognize`.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Engine name (e.g., "tesseract").
    fn name(&self) -> &str;

    /// One-time setup: load models, verify binaries and language packs.
    async fn initialize(&self, languages: &LanguageSet) -> Result<(), OcrBatchError>;

    /// Recognize text in the image at `image_path`.
    ///
    /// Returns text segments in the engine's reading order.
    async fn recognize(
        &self,
        image_path: &Path,
        languages: &LanguageSet,
    ) -> Result<Vec<String>, OcrBatchError>;
}
