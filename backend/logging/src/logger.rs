//! Structured Logger
//!
//! Wraps `tracing` with a console layer on stderr and, when a directory is
//! given, a daily-rotated NDJSON file layer. `RUST_LOG` overrides the level.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log files are named `ocrbatch.log.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "ocrbatch.log";

/// `RUST_LOG` if set and valid, otherwise `level`, otherwise `warn`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize the global structured logger.
///
/// Stdout is left to progress output, so the console layer writes to stderr.
/// Calling this twice is a no-op.
pub fn init_logger(level: &str, log_dir: Option<&Path>) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let mut file_error = None;
    let file_layer = log_dir.and_then(|dir| {
        match RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .build(dir)
        {
            Ok(file_appender) => Some(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_ansi(false),
            ),
            Err(e) => {
                file_error = Some(format!("{}: {e}", dir.display()));
                None
            }
        }
    });

    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if let Some(reason) = file_error {
        tracing::warn!(%reason, "File logging disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_falls_back() {
        // An unparsable directive must not panic.
        let filter = build_filter("not a [valid directive");
        let _ = filter.to_string();
    }

    #[test]
    fn init_with_log_dir_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        init_logger("info", Some(dir.path()));
        init_logger("debug", None);
        tracing::info!("logger initialized");
    }
}
