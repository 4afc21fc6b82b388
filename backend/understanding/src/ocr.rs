//! Optical Character Recognition (OCR)
//!
//! Adapter between the batch pipeline and a text-recognition engine. The
//! engine is injected at construction and initialized lazily, once, on the
//! first image.

use std::sync::Arc;
use std::time::Instant;

use ocrbatch_core::{ImageTask, LanguageSet, OcrBatchError, OcrEngine, OcrResult};
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub struct OcrService {
    engine: Arc<dyn OcrEngine>,
    languages: LanguageSet,
    ready: OnceCell<()>,
}

impl OcrService {
    pub fn new(engine: Arc<dyn OcrEngine>, languages: LanguageSet) -> Self {
        Self {
            engine,
            languages,
            ready: OnceCell::new(),
        }
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Whether the engine has completed its one-time initialization.
    pub fn is_initialized(&self) -> bool {
        self.ready.initialized()
    }

    /// Run OCR on one image and pair the text with the original file name.
    pub async fn extract_text(&self, task: &ImageTask) -> Result<OcrResult, OcrBatchError> {
        self.ensure_initialized().await?;

        debug!(file = %task.file_name, engine = self.engine.name(), "Running OCR");
        let extracted_text = self
            .engine
            .recognize(&task.absolute_path, &self.languages)
            .await?;

        Ok(OcrResult {
            image_file: task.file_name.clone(),
            extracted_text,
        })
    }

    async fn ensure_initialized(&self) -> Result<(), OcrBatchError> {
        self.ready
            .get_or_try_init(|| async {
                let started = Instant::now();
                info!(engine = self.engine.name(), languages = %self.languages, "Initializing OCR engine");
                self.engine.initialize(&self.languages).await?;
                info!(
                    engine = self.engine.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "OCR engine ready"
                );
                Ok::<(), OcrBatchError>(())
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingEngine {
        inits: AtomicUsize,
        fail_init: bool,
    }

    #[async_trait]
    impl OcrEngine for CountingEngine {
        fn name(&self) -> &str {
            "counting"
        }

        async fn initialize(&self, _languages: &LanguageSet) -> Result<(), OcrBatchError> {
            self.inits.fetch_add(1, Ordering::SeqCst);
            if self.fail_init {
                return Err(OcrBatchError::EngineUnavailable {
                    engine: "counting".into(),
                    message: "no models".into(),
                });
            }
            Ok(())
        }

        async fn recognize(
            &self,
            image_path: &Path,
            languages: &LanguageSet,
        ) -> Result<Vec<String>, OcrBatchError> {
            let name = image_path.file_name().unwrap().to_string_lossy().to_string();
            if name.starts_with("bad") {
                return Err(OcrBatchError::OcrEngine {
                    file: name,
                    message: "corrupt image".into(),
                });
            }
            Ok(vec![name, languages.joined()])
        }
    }

    #[tokio::test]
    async fn initializes_once_across_files() {
        let engine = Arc::new(CountingEngine::default());
        let service = OcrService::new(engine.clone(), LanguageSet::default());
        assert!(!service.is_initialized());

        for name in ["a.png", "b.jpg", "c.jpeg"] {
            let task = ImageTask::new(name, format!("/in/{name}"));
            service.extract_text(&task).await.unwrap();
        }

        assert!(service.is_initialized());
        assert_eq!(engine.inits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn result_keeps_original_file_name() {
        let service = OcrService::new(Arc::new(CountingEngine::default()), LanguageSet::single("deu"));
        let task = ImageTask::new("Photo.PNG", "/in/Photo.PNG");
        let result = service.extract_text(&task).await.unwrap();
        assert_eq!(result.image_file, "Photo.PNG");
        assert_eq!(result.extracted_text, vec!["Photo.PNG".to_string(), "deu".to_string()]);
    }

    #[tokio::test]
    async fn per_file_failure_does_not_poison_service() {
        let service = OcrService::new(Arc::new(CountingEngine::default()), LanguageSet::default());
        let bad = service.extract_text(&ImageTask::new("bad.png", "/in/bad.png")).await;
        assert!(matches!(bad, Err(OcrBatchError::OcrEngine { .. })));

        let good = service.extract_text(&ImageTask::new("ok.png", "/in/ok.png")).await;
        assert!(good.is_ok());
    }

    #[tokio::test]
    async fn failed_initialization_is_retried() {
        let engine = Arc::new(CountingEngine {
            fail_init: true,
            ..Default::default()
        });
        let service = OcrService::new(engine.clone(), LanguageSet::default());
        let task = ImageTask::new("a.png", "/in/a.png");

        for _ in 0..2 {
            let err = service.extract_text(&task).await.unwrap_err();
            assert!(err.is_fatal());
        }
        assert!(!service.is_initialized());
        assert_eq!(engine.inits.load(Ordering::SeqCst), 2);
    }
}
