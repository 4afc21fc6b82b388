//! Progress lines on stdout while the batch runs.

use std::path::Path;

use ocrbatch_core::{ImageTask, OcrBatchError};
use ocrbatch_executor::{BatchObserver, BatchReport};

use crate::terminal_output::{note_error, note_info, note_success, note_warn, render_table, Column};

/// Longest error message shown in the failure table.
const MAX_ERROR_WIDTH: usize = 80;

pub struct ConsoleProgress;

impl BatchObserver for ConsoleProgress {
    fn on_start(&self, task: &ImageTask) {
        note_info(&start_line(task));
    }

    fn on_saved(&self, _task: &ImageTask, output: &Path) {
        note_success(&saved_line(output));
    }

    fn on_failed(&self, task: &ImageTask, error: &OcrBatchError) {
        note_error(&failed_line(task, error));
    }
}

fn start_line(task: &ImageTask) -> String {
    format!("Processing: {}", task.file_name)
}

fn saved_line(output: &Path) -> String {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.display().to_string());
    format!("Saved OCR result to: {name}")
}

fn failed_line(task: &ImageTask, error: &OcrBatchError) -> String {
    format!("Failed: {}: {error}", task.file_name)
}

/// One-line summary, plus a table of failures if any.
pub fn print_summary(report: &BatchReport, output_dir: &Path) {
    let line = format!(
        "Processed {} of {} image(s) into {}",
        report.succeeded.len(),
        report.scanned,
        output_dir.display()
    );

    if !report.overwritten.is_empty() {
        note_warn(&format!(
            "Results overwritten by a file with the same base name: {}",
            report.overwritten.join(", ")
        ));
    }

    if report.is_clean() {
        note_success(&line);
        return;
    }

    note_warn(&format!("{line}; {} failed", report.failures.len()));
    let columns = vec![Column::new("File"), Column::new("Error").max_width(MAX_ERROR_WIDTH)];
    let rows: Vec<Vec<String>> = report
        .failures
        .iter()
        .map(|f| vec![f.file_name.clone(), f.error.clone()])
        .collect();
    print!("{}", render_table(&columns, &rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_file_lines() {
        let task = ImageTask::new("Straße.PNG", "/in/Straße.PNG");
        assert_eq!(start_line(&task), "Processing: Straße.PNG");
        assert_eq!(
            saved_line(Path::new("/out/Straße_ocr.json")),
            "Saved OCR result to: Straße_ocr.json"
        );

        let error = OcrBatchError::OcrEngine {
            file: "Straße.PNG".into(),
            message: "unreadable image".into(),
        };
        assert_eq!(
            failed_line(&task, &error),
            "Failed: Straße.PNG: OCR engine failed on Straße.PNG: unreadable image"
        );
    }
}
