pub mod error;
pub mod traits;
pub mod types;

pub use error::OcrBatchError;
pub use traits::OcrEngine;
pub use types::{FailurePolicy, ImageTask, LanguageSet, OcrResult, OutputFormat};
