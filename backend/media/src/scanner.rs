//! Directory Scanner
//!
//! Lists an input directory and yields one `ImageTask` per image file.
//! The listing is lazy; calling `scan` again starts a fresh pass.

use std::fs;
use std::path::{Path, PathBuf};

use ocrbatch_core::{ImageTask, OcrBatchError};
use tracing::{debug, warn};

use crate::mime_detect::{DEFAULT_IMAGE_EXTENSIONS, detect_image_mime, has_extension};

pub struct DirectoryScanner {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirectoryScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Replace the accepted extension set. Entries are normalized to
    /// lowercase without a leading dot; an empty set keeps the defaults.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized: Vec<String> = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if !normalized.is_empty() {
            self.extensions = normalized;
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Start a pass over the directory.
    ///
    /// Fails with `DirectoryNotFound` if the root is missing or is not a
    /// directory. Nothing is read beyond opening the directory handle.
    pub fn scan(&self) -> Result<ScanIter, OcrBatchError> {
        if !self.root.is_dir() {
            return Err(OcrBatchError::DirectoryNotFound {
                path: self.root.clone(),
            });
        }

        let root = fs::canonicalize(&self.root).map_err(|_| OcrBatchError::DirectoryNotFound {
            path: self.root.clone(),
        })?;

        let entries = fs::read_dir(&root).map_err(|e| {
            OcrBatchError::Other(anyhow::anyhow!(
                "failed to list {}: {}",
                root.display(),
                e
            ))
        })?;

        debug!(root = %root.display(), extensions = ?self.extensions, "Scanning input directory");

        Ok(ScanIter {
            root,
            entries,
            extensions: self.extensions.clone(),
        })
    }
}

/// Lazy sequence of image tasks from one directory pass.
pub struct ScanIter {
    root: PathBuf,
    entries: fs::ReadDir,
    extensions: Vec<String>,
}

impl Iterator for ScanIter {
    type Item = ImageTask;

    fn next(&mut self) -> Option<ImageTask> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(root = %self.root.display(), error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            let file_name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(name = ?raw, "Skipping entry with non UTF-8 name");
                    continue;
                }
            };

            if !has_extension(&file_name, &self.extensions) {
                continue;
            }

            let path = self.root.join(&file_name);
            if !path.is_file() {
                debug!(file = %file_name, "Skipping non-file entry");
                continue;
            }

            debug!(file = %file_name, mime = detect_image_mime(&file_name), "Queued image");
            return Some(ImageTask::new(file_name, path));
        }
    }
}
