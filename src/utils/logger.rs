use anyhow::{Context, Result};
use std::backtrace::Backtrace;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

/// Append-only event log for a single run.
///
/// Opened once in `main` and handed to every stage by reference. Each event is
/// one line: `<timestamp>\t<LEVEL>\t<message>`. The file is never truncated, so
/// repeated runs accumulate in the same log.
pub struct RunLogger {
    path: PathBuf,
    file: File,
}

fn format_line(level: Level, msg: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
    // keep one event per line even for multi-line error chains
    let msg = msg.replace(['\r', '\n'], " ");
    format!("{}\t{}\t{}", timestamp, level.as_str(), msg)
}

fn append_line(path: &Path, line: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", line);
    }
}

impl RunLogger {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log(&self, level: Level, msg: &str) {
        let line = format_line(level, msg);
        // best effort
        let mut file = &self.file;
        let _ = writeln!(file, "{}", line);
    }

    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    pub fn warning(&self, msg: &str) {
        self.log(Level::Warning, msg);
    }

    pub fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }

    pub fn critical(&self, msg: &str) {
        self.log(Level::Critical, msg);
    }

    /// Route panics into the event log so a crash mid-stage still leaves a
    /// CRITICAL entry behind.
    pub fn install_panic_hook(&self) {
        let path = self.path.clone();
        let default_hook = panic::take_hook();

        panic::set_hook(Box::new(move |info| {
            let backtrace = Backtrace::capture();
            let msg = match info.payload().downcast_ref::<&str>() {
                Some(s) => *s,
                None => match info.payload().downcast_ref::<String>() {
                    Some(s) => &s[..],
                    None => "Box<Any>",
                },
            };

            let location = info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_else(|| "unknown".to_string());

            let line = format_line(
                Level::Critical,
                &format!("panic at {}: {} (backtrace: {:?})", location, msg, backtrace),
            );
            append_line(&path, &line);

            default_hook(info);
        }));
    }

    pub fn close(self) -> Result<()> {
        self.file
            .sync_all()
            .with_context(|| format!("failed to flush log file {}", self.path.display()))
    }
}
