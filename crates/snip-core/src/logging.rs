//! Tracing setup shared by the server and the client commands.
//!
//! Events go to `~/.local/state/snip/snip.log` when the state directory is
//! writable, otherwise to stderr. `RUST_LOG` replaces [`DEFAULT_FILTER`].

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,snip=debug,snip_core=debug";
pub const LOG_FILE: &str = "snip.log";

/// Path of a file under `~/.local/state/snip/`, creating the directory if needed.
/// Shared by the log file and the link database.
pub fn state_file(name: &str) -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("snip")?;
    Ok(xdg_dirs.place_state_file(name)?)
}

/// Append-only log file; every event is written through `&File`.
struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = &'a File;

    fn make_writer(&'a self) -> Self::Writer {
        &self.0
    }
}

fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to the state-dir log file.
/// Returns the file's path; on error the caller falls back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let path = state_file(LOG_FILE)?;
    let file = open_log(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(LogFile(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber: {}", e))?;

    tracing::info!("snip logging initialized at {}", path.display());
    Ok(path)
}

pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
