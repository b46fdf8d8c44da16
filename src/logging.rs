// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Logging set up from the `[logging]` configuration section.

use std::path::Path;

use anyhow::Result;

use crate::config::LoggingConfig;
use crate::observability::{init_console_logging, CrateDebugFlags};

/// Keeps file logging alive; hold it for the life of the host
#[must_use]
pub struct LoggingHandle {
    #[cfg(feature = "file-logging")]
    guard: Option<crate::observability::LoggingGuard>,
}

impl LoggingHandle {
    /// Run folder receiving the JSON log, when file logging is on
    pub fn log_dir(&self) -> Option<&Path> {
        #[cfg(feature = "file-logging")]
        {
            self.guard.as_ref().map(|g| g.log_dir())
        }
        #[cfg(not(feature = "file-logging"))]
        {
            None
        }
    }
}

/// Install the global subscriber described by `config`
///
/// `config.level` is the base level; `debug_flags` switch single crates to
/// `debug`. File logging needs the `file-logging` feature.
pub fn init_from_config(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<LoggingHandle> {
    if !config.file_logging {
        init_console_logging(debug_flags, &config.level)?;
        return Ok(LoggingHandle {
            #[cfg(feature = "file-logging")]
            guard: None,
        });
    }

    #[cfg(feature = "file-logging")]
    {
        let guard = crate::observability::init_logging(
            debug_flags,
            &config.level,
            &config.log_dir,
            config.retention_days,
            config.retention_runs,
        )?;
        Ok(LoggingHandle { guard: Some(guard) })
    }
    #[cfg(not(feature = "file-logging"))]
    {
        anyhow::bail!(
            "file logging to {} requested, but caret was built without the `file-logging` feature",
            config.log_dir.display()
        )
    }
}
