//! Structured logging for ocrbatch.
//!
//! Console output on stderr, optional rolling NDJSON files.

pub mod logger;

pub use logger::{LOG_FILE_PREFIX, build_filter, init_logger};
