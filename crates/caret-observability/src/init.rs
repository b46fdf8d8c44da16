// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for CARET
//!
//! Console logging is always available. With the `file-logging` feature a
//! timestamped run folder receives a JSON log file with daily rotation, and old
//! run folders are removed according to the retention policy:
//!
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── caret.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Initialize console logging
///
/// `base_level` applies to everything not switched to `debug` by `debug_flags`.
/// Fails if a global subscriber is already installed.
pub fn init_console_logging(debug_flags: &CrateDebugFlags, base_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(debug_flags.to_filter_string(base_level))
        .with_context(|| format!("Invalid log filter for level '{}'", base_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))
}

/// Folder name for a run started at `started`
pub fn run_folder_name(started: DateTime<Utc>) -> String {
    format!("{}{}", RUN_PREFIX, started.format(RUN_TIMESTAMP_FORMAT))
}

/// Parse the start time back out of a run folder name
pub fn parse_run_folder_name(name: &str) -> Option<DateTime<Utc>> {
    let stamp = name.strip_prefix(RUN_PREFIX)?;
    NaiveDateTime::parse_from_str(stamp, RUN_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Pick which run folders to delete
///
/// Runs older than `retention_days` go first; of the rest only the newest
/// `retention_runs` are kept.
pub fn runs_to_remove(
    mut runs: Vec<(PathBuf, DateTime<Utc>)>,
    now: DateTime<Utc>,
    retention_days: u64,
    retention_runs: usize,
) -> Vec<PathBuf> {
    runs.sort_by_key(|(_, started)| *started);
    let cutoff = now - chrono::Duration::days(retention_days as i64);

    let (expired, recent): (Vec<_>, Vec<_>) =
        runs.into_iter().partition(|(_, started)| *started < cutoff);

    let surplus = recent.len().saturating_sub(retention_runs);
    expired
        .into_iter()
        .chain(recent.into_iter().take(surplus))
        .map(|(path, _)| path)
        .collect()
}

/// Collect the run folders below `base_log_dir`
pub fn list_runs(base_log_dir: &Path) -> Result<Vec<(PathBuf, DateTime<Utc>)>> {
    let mut runs = Vec::new();
    if !base_log_dir.exists() {
        return Ok(runs);
    }
    for entry in std::fs::read_dir(base_log_dir)
        .with_context(|| format!("Failed to list log directory: {}", base_log_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let started = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_run_folder_name);
        if let Some(started) = started {
            runs.push((path, started));
        }
    }
    Ok(runs)
}

#[cfg(feature = "file-logging")]
pub use file::{init_logging, LoggingGuard};

#[cfg(feature = "file-logging")]
mod file {
    use super::*;
    use tracing_appender::rolling;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{Layer, Registry};

    /// Keeps the non-blocking writer alive; logs are flushed on drop.
    pub struct LoggingGuard {
        _file_guard: tracing_appender::non_blocking::WorkerGuard,
        log_dir: PathBuf,
    }

    impl LoggingGuard {
        pub fn log_dir(&self) -> &Path {
            &self.log_dir
        }
    }

    /// Initialize console + JSON file logging in a fresh run folder
    pub fn init_logging(
        debug_flags: &CrateDebugFlags,
        base_level: &str,
        log_dir: &Path,
        retention_days: u64,
        retention_runs: usize,
    ) -> Result<LoggingGuard> {
        let run_folder = log_dir.join(run_folder_name(Utc::now()));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        for stale in runs_to_remove(list_runs(log_dir)?, Utc::now(), retention_days, retention_runs) {
            if stale == run_folder {
                continue;
            }
            if let Err(e) = std::fs::remove_dir_all(&stale) {
                eprintln!("Warning: Failed to remove old log directory {}: {}", stale.display(), e);
            }
        }

        let filter_string = debug_flags.to_filter_string(base_level);
        let console_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_filter(EnvFilter::try_new(&filter_string)?)
            .boxed();

        let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&run_folder, "caret.log"));
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(EnvFilter::try_new(&filter_string)?)
            .boxed();

        Registry::default()
            .with(vec![console_layer, file_layer])
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;

        Ok(LoggingGuard {
            _file_guard: guard,
            log_dir: run_folder,
        })
    }
}
