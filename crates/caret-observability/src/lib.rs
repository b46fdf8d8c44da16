// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! # caret-observability
//!
//! Logging setup shared by the CARET crates, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files with daily rotation and run-folder retention

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known CARET crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "caret-autoload",
    "caret-volume-edit",
    "caret-config",
    "caret-structures",
];

/// Tracing target for a crate name (`caret-autoload` logs as `caret_autoload`).
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}
