mod progress;
mod terminal_output;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, warn};

use ocrbatch_config::OcrBatchConfig;
use ocrbatch_executor::{BatchExecutor, BatchReport, ResultWriter};
use ocrbatch_media::DirectoryScanner;
use ocrbatch_understanding::{OcrService, TesseractEngine, TesseractOptions};

use progress::ConsoleProgress;

/// Exit status for a bad invocation.
const USAGE_EXIT_CODE: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "ocrbatch")]
#[command(about = "Extract text from every image in a folder, one result file per image")]
#[command(version)]
struct Cli {
    /// Folder containing .png, .jpg or .jpeg images
    #[arg(allow_hyphen_values = true)]
    input_dir: PathBuf,
    /// Folder for <name>_ocr.json results (created if missing)
    #[arg(allow_hyphen_values = true)]
    output_dir: PathBuf,
    /// Anything past the two directories is accepted and ignored.
    #[arg(hide = true, num_args = 0.., allow_hyphen_values = true)]
    extra: Vec<OsString>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return Ok(ExitCode::from(USAGE_EXIT_CODE));
        }
    };

    let config = ocrbatch_config::load_and_prepare()
        .await
        .context("Failed to load configuration")?;

    ocrbatch_logging::init_logger(config.log_level(), config.log_dir().map(PathBuf::as_path));
    debug!(?config, "Effective configuration");
    if !cli.extra.is_empty() {
        warn!(ignored = ?cli.extra, "Ignoring extra arguments");
    }

    let report = run(&cli, &config).await?;
    progress::print_summary(&report, &cli.output_dir);

    Ok(ExitCode::SUCCESS)
}

async fn run(cli: &Cli, config: &OcrBatchConfig) -> Result<BatchReport> {
    let tesseract = config.tesseract.clone().unwrap_or_default();
    let engine = Arc::new(TesseractEngine::new(TesseractOptions {
        dpi: tesseract.dpi,
        psm: tesseract.psm,
        oem: tesseract.oem,
    }));

    let executor = BatchExecutor::new(
        DirectoryScanner::new(&cli.input_dir).with_extensions(config.extension_list()),
        OcrService::new(engine, config.language_set()),
        ResultWriter::new(&cli.output_dir, config.output_format()),
    )
    .with_policy(config.failure_policy());

    executor
        .run(&ConsoleProgress)
        .await
        .with_context(|| format!("OCR batch over {} failed", cli.input_dir.display()))
}
