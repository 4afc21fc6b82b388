use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ocrbatch_core::{FailurePolicy, ImageTask, OcrBatchError};
use ocrbatch_media::DirectoryScanner;
use ocrbatch_understanding::OcrService;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::writer::ResultWriter;

/// Receives progress for each file as the batch runs.
pub trait BatchObserver: Send + Sync {
    fn on_start(&self, _task: &ImageTask) {}
    fn on_saved(&self, _task: &ImageTask, _output: &Path) {}
    fn on_failed(&self, _task: &ImageTask, _error: &OcrBatchError) {}
}

/// Observer that ignores every event.
pub struct SilentObserver;

impl BatchObserver for SilentObserver {}

/// A file that could not be processed.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file_name: String,
    pub error: String,
}

/// Outcome of a completed batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub scanned: usize,
    pub succeeded: Vec<String>,
    pub failures: Vec<FileFailure>,
    /// Files whose result replaced one written earlier in the same batch
    /// (`a.png` and `a.jpg` both map to `a_ocr.json`).
    pub overwritten: Vec<String>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives Scanner -> OCR -> Writer for every image, one at a time.
pub struct BatchExecutor {
    scanner: DirectoryScanner,
    ocr: OcrService,
    writer: ResultWriter,
    policy: FailurePolicy,
}

impl BatchExecutor {
    pub fn new(scanner: DirectoryScanner, ocr: OcrService, writer: ResultWriter) -> Self {
        Self {
            scanner,
            ocr,
            writer,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the batch.
    ///
    /// The input directory is checked before the output directory is
    /// created, so a bad input path leaves no trace. Per-file failures are
    /// recorded and skipped under `FailurePolicy::Continue`; fatal errors
    /// always end the run.
    pub async fn run(&self, observer: &dyn BatchObserver) -> Result<BatchReport, OcrBatchError> {
        let started = Instant::now();
        let tasks = self.scanner.scan()?;
        self.writer.prepare().await?;

        info!(
            input = %self.scanner.root().display(),
            output = %self.writer.output_dir().display(),
            engine = self.ocr.engine_name(),
            languages = %self.ocr.languages(),
            policy = ?self.policy,
            "Starting OCR batch"
        );

        let mut report = BatchReport::default();
        let mut written: HashMap<PathBuf, String> = HashMap::new();

        for task in tasks {
            report.scanned += 1;
            observer.on_start(&task);

            match self.process(&task).await {
                Ok(output) => {
                    info!(file = %task.file_name, output = %output.display(), "Saved OCR result");
                    observer.on_saved(&task, &output);
                    if let Some(previous) = written.insert(output.clone(), task.file_name.clone()) {
                        warn!(
                            file = %task.file_name,
                            previous = %previous,
                            output = %output.display(),
                            "Result replaced one written earlier in this batch"
                        );
                        report.overwritten.push(task.file_name.clone());
                    }
                    report.succeeded.push(task.file_name.clone());
                }
                Err(e) => {
                    observer.on_failed(&task, &e);
                    if e.is_fatal() || self.policy == FailurePolicy::FailFast {
                        error!(file = %task.file_name, error = %e, "Aborting batch");
                        return Err(e);
                    }
                    warn!(file = %task.file_name, error = %e, "Skipping file");
                    report.failures.push(FileFailure {
                        file_name: task.file_name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            scanned = report.scanned,
            succeeded = report.succeeded.len(),
            failed = report.failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "OCR batch finished"
        );
        Ok(report)
    }

    async fn process(&self, task: &ImageTask) -> Result<PathBuf, OcrBatchError> {
        let result = self.ocr.extract_text(task).await?;
        self.writer.write(&result).await
    }
}
