pub mod ocr;
pub mod tesseract;

pub use ocr::OcrService;
pub use tesseract::{TesseractEngine, TesseractOptions, WordBox, assemble_lines};
