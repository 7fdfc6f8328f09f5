//! Operator log for coderev.
//!
//! The TUI owns the terminal, so diagnostics go to
//! `$XDG_STATE_HOME/coderev/coderev.log` through a non-blocking writer.
//! `RUST_LOG` overrides the default `coderev=info,coderev_core=info` filter.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "coderev=info,coderev_core=info";

/// Keeps the background writer alive; dropping it flushes pending lines.
pub struct LogGuard {
    _guard: WorkerGuard,
    pub path: PathBuf,
}

/// Installs the global subscriber writing to `dir/coderev.log` (appending).
///
/// # Errors
///
/// Returns `Err` if the directory cannot be created or the file cannot be opened.
pub fn init_logging(dir: &Path) -> std::io::Result<LogGuard> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("coderev.log");
    let file: File = OpenOptions::new().create(true).append(true).open(&path)?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // try_init: a second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    Ok(LogGuard { _guard: guard, path })
}
