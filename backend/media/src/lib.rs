//! Input side of the pipeline: finds the images a batch will process.

pub mod mime_detect;
pub mod scanner;

pub use mime_detect::{DEFAULT_IMAGE_EXTENSIONS, detect_image_mime, extension_of, has_extension};
pub use scanner::{DirectoryScanner, ScanIter};
