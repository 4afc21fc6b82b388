pub mod executor;
pub mod writer;

pub use executor::{BatchExecutor, BatchObserver, BatchReport, FileFailure, SilentObserver};
pub use writer::ResultWriter;
