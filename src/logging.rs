//! Console and run-log output.
//!
//! Every event is appended to a per-run log file named after the start time.
//! The console gets the same stream minus per-row detail, which is tagged
//! with [`ROW_TARGET`].

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Target for events that belong in the run log only.
pub const ROW_TARGET: &str = "bpmspawner::row";

pub fn log_file_name(started: NaiveDateTime) -> String {
    format!("bpmspawner_{}.log", started.format("%Y%m%d%H%M%S"))
}

/// Install the global subscriber and return the run-log path.
///
/// `RUST_LOG` overrides the default `info` level for both outputs.
pub fn init(log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir).with_context(|| format!("create {}", log_dir.display()))?;
    let path = log_dir.join(log_file_name(chrono::Local::now().naive_local()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stdout)
        .with_filter(filter_fn(|meta| meta.target() != ROW_TARGET));
    let run_log = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(run_log)
        .try_init()
        .context("install log subscriber")?;
    Ok(path)
}
