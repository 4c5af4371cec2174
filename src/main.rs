mod core;
mod decoder;
mod shared;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::error::PipelineError;
use crate::core::pipeline;
use crate::shared::settings::Settings;
use crate::utils::logger::RunLogger;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Split a video into numbered RGB frames and their grayscale counterparts",
    long_about = None
)]
struct Cli {
    /// Video to split (default: ./source.mp4)
    #[arg(short, long)]
    source: Option<PathBuf>,
    /// Directory the Lesson_1 tree is created under (default: current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,
    /// File name of the copied video inside Lesson_1/data
    #[arg(long)]
    video_name: Option<String>,
    /// Digits in frame file names; larger indices keep all their digits
    #[arg(short, long)]
    pad_width: Option<usize>,
    /// Event log, appended to on every run (default: ./events.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// `key = value` config file (default: ./frame_splitter.config if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Reload both frame sequences after the run and check they line up
    #[arg(long, default_value_t = false)]
    verify: bool,
    /// Print a JSON summary of the run to stdout
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn resolve_settings(cli: Cli) -> Result<(Settings, Vec<String>)> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let (mut settings, warnings) = Settings::load(&cwd, cli.config.as_deref())?;

    if let Some(source) = cli.source {
        settings.source = source;
    }
    if let Some(root) = cli.root {
        settings.root = root;
    }
    if let Some(video_name) = cli.video_name {
        settings.video_name = video_name;
    }
    if let Some(pad_width) = cli.pad_width {
        settings.pad_width = pad_width;
    }
    if let Some(log_file) = cli.log_file {
        settings.log_file = log_file;
    }
    settings.verify |= cli.verify;
    settings.summary |= cli.summary;

    settings.validate()?;
    Ok((settings, warnings))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (settings, warnings) = match resolve_settings(cli) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("error: {:#}", err);
            return ExitCode::from(1);
        }
    };

    // 1. Open the event log; it lives until the end of main
    let logger = match RunLogger::open(&settings.log_file) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("error: {:#}", err);
            return ExitCode::from(1);
        }
    };
    logger.install_panic_hook();
    logger.info("**************** New execution started! ****************");
    for warning in &warnings {
        logger.warning(warning);
    }

    // 2. Run the stages
    let code = match pipeline::run(&settings, &logger) {
        Ok(summary) => {
            if settings.summary {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(err) => logger.error(&format!("failed to render run summary: {}", err)),
                }
            }
            0
        }
        Err(err) => match err.downcast_ref::<PipelineError>() {
            // already logged at CRITICAL where it was detected
            Some(missing @ PipelineError::SourceMissing(_)) => missing.exit_code(),
            Some(other) => {
                logger.error(&format!("Run aborted: {}", other));
                eprintln!("error: {}", other);
                other.exit_code()
            }
            None => {
                logger.error(&format!("Run aborted: {:#}", err));
                eprintln!("error: {:#}", err);
                1
            }
        },
    };
    if code != 0 {
        eprintln!("See {} for details.", logger.path().display());
    }

    if let Err(err) = logger.close() {
        eprintln!("warning: {:#}", err);
    }
    ExitCode::from(code)
}
