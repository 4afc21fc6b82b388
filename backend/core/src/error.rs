use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for an ocrbatch run.
#[derive(Debug, Error)]
pub enum OcrBatchError {
    #[error("directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("OCR engine failed on {file}: {message}")]
    OcrEngine { file: String, message: String },

    #[error("OCR engine unavailable ({engine}): {message}")]
    EngineUnavailable { engine: String, message: String },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize result for {file}: {message}")]
    Serialization { file: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OcrBatchError {
    /// Whether this error ends the whole batch regardless of failure policy.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            OcrBatchError::DirectoryNotFound { .. }
                | OcrBatchError::EngineUnavailable { .. }
                | OcrBatchError::Config(_)
                | OcrBatchError::Other(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_file_errors_are_not_fatal() {
        let ocr = OcrBatchError::OcrEngine {
            file: "a.png".into(),
            message: "corrupt".into(),
        };
        let write = OcrBatchError::Write {
            path: PathBuf::from("/out/a_ocr.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!ocr.is_fatal());
        assert!(!write.is_fatal());
    }

    #[test]
    fn missing_directory_is_fatal() {
        let err = OcrBatchError::DirectoryNotFound {
            path: PathBuf::from("/nope"),
        };
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "directory not found: /nope");
    }
}
