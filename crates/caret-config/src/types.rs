// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `caret_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CaretConfig {
    pub autoload: AutoLoadConfig,
    pub volume_edit: VolumeEditConfig,
    pub logging: LoggingConfig,
}

/// Auto-loader families and file matching
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AutoLoadConfig {
    /// Number of metric-by-voxel loaders
    pub metric_voxel_loaders: usize,
    /// Number of metric-by-node loaders
    pub metric_node_loaders: usize,
    /// Number of functional-volume loaders
    pub functional_volume_loaders: usize,
    /// Number of paint-cluster loaders
    pub cluster_loaders: usize,
    /// Extension of voxel-keyed files (gzipped NIfTI)
    pub volume_extension: String,
    /// Extension of node-keyed metric files
    pub metric_extension: String,
    /// Prefix of the file names built by cluster loaders
    pub cluster_file_prefix: String,
    /// Sort directory listings before matching so "first match" is stable
    pub sort_directory_entries: bool,
    /// Record probes that reached the filesystem but found nothing / failed to read
    pub record_failed_attempts: bool,
    /// Replay restored history through the loaders when a scene is shown
    pub replay_history_on_restore: bool,
    /// Promote newly loaded data to the primary overlay
    pub promote_overlays: bool,
}

impl Default for AutoLoadConfig {
    fn default() -> Self {
        Self {
            metric_voxel_loaders: 4,
            metric_node_loaders: 4,
            functional_volume_loaders: 4,
            cluster_loaders: 4,
            volume_extension: ".nii.gz".to_string(),
            metric_extension: ".metric".to_string(),
            cluster_file_prefix: "cluster_".to_string(),
            sort_directory_entries: true,
            record_failed_attempts: true,
            replay_history_on_restore: true,
            promote_overlays: true,
        }
    }
}

/// Paint volume editor
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VolumeEditConfig {
    /// Maximum number of strokes kept for undo (oldest dropped first)
    pub max_undo_depth: usize,
    /// Brush radius selected when the editor opens (0 = 1x1, 5 = 11x11)
    pub default_brush_radius: u8,
    /// Color (RGB) assigned to paint names that have no area color yet
    pub default_area_color: [u8; 3],
}

impl Default for VolumeEditConfig {
    fn default() -> Self {
        Self {
            max_undo_depth: 64,
            default_brush_radius: 0,
            default_area_color: [255, 0, 0],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_logging: bool,
    pub log_dir: PathBuf,
    pub retention_days: u64,
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
            log_dir: PathBuf::from("./logs"),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}

impl AutoLoadConfig {
    /// Family sizes in dispatch order (metric-node, metric-voxel, functional-volume, cluster)
    pub fn family_sizes(&self) -> [(&'static str, usize); 4] {
        [
            ("metric_node_loaders", self.metric_node_loaders),
            ("metric_voxel_loaders", self.metric_voxel_loaders),
            ("functional_volume_loaders", self.functional_volume_loaders),
            ("cluster_loaders", self.cluster_loaders),
        ]
    }
}
