// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! State shared by every loader.

use std::fmt::{Debug, Display};
use std::path::{Path, PathBuf};

use caret_config::AutoLoadConfig;
use caret_structures::{NodeIndex, SurfaceHandle, VolumeHandle, VoxelIJK};
use tracing::debug;

use crate::context::{BrainDataSet, FileRepository, InstalledSlot};

/// What a loader is keyed by: a voxel or a surface node
pub trait ProbeKey: Copy + PartialEq + Debug + Display {
    /// Integers the file name must carry
    fn file_key(&self) -> Vec<u64>;

    /// Probe as it appears in messages
    fn describe(&self) -> String {
        self.to_string()
    }

    fn to_scene_value(&self) -> String;

    fn from_scene_value(value: &str) -> Option<Self>;
}

impl ProbeKey for VoxelIJK {
    fn file_key(&self) -> Vec<u64> {
        self.as_array().iter().map(|&c| c as u64).collect()
    }

    fn to_scene_value(&self) -> String {
        self.to_scene_string()
    }

    fn from_scene_value(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl ProbeKey for NodeIndex {
    fn file_key(&self) -> Vec<u64> {
        vec![*self as u64]
    }

    fn describe(&self) -> String {
        format!("node {}", self)
    }

    fn to_scene_value(&self) -> String {
        self.to_string()
    }

    fn from_scene_value(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

/// Settings every loader reads on each probe
#[derive(Debug, Clone)]
pub struct LoadPolicy {
    pub sort_directory_entries: bool,
    pub record_failed_attempts: bool,
    pub promote_overlays: bool,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self::from_config(&AutoLoadConfig::default())
    }
}

impl LoadPolicy {
    pub fn from_config(config: &AutoLoadConfig) -> Self {
        Self {
            sort_directory_entries: config.sort_directory_entries,
            record_failed_attempts: config.record_failed_attempts,
            promote_overlays: config.promote_overlays,
        }
    }
}

/// Selections, last install and probe history of one loader
#[derive(Debug, Clone)]
pub struct AutoLoaderState<P: ProbeKey> {
    enabled: bool,
    directory: PathBuf,
    secondary_directory: PathBuf,
    replace_last: bool,
    anatomy_volume: Option<VolumeHandle>,
    intersection_surface: Option<SurfaceHandle>,
    display_surface: Option<SurfaceHandle>,
    last_installed: Option<InstalledSlot>,
    last_probe: Option<P>,
    history: Vec<P>,
}

impl<P: ProbeKey> Default for AutoLoaderState<P> {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::new(),
            secondary_directory: PathBuf::new(),
            replace_last: false,
            anatomy_volume: None,
            intersection_surface: None,
            display_surface: None,
            last_installed: None,
            last_probe: None,
            history: Vec::new(),
        }
    }
}

impl<P: ProbeKey> AutoLoaderState<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn set_secondary_directory(&mut self, directory: impl Into<PathBuf>) {
        self.secondary_directory = directory.into();
    }

    pub fn secondary_directory(&self) -> &Path {
        &self.secondary_directory
    }

    pub fn set_replace_last(&mut self, replace_last: bool) {
        self.replace_last = replace_last;
    }

    pub fn replace_last(&self) -> bool {
        self.replace_last
    }

    pub fn set_anatomy_volume(&mut self, volume: Option<VolumeHandle>) {
        self.anatomy_volume = volume;
    }

    pub fn anatomy_volume(&self) -> Option<VolumeHandle> {
        self.anatomy_volume
    }

    pub fn set_intersection_surface(&mut self, surface: Option<SurfaceHandle>) {
        self.intersection_surface = surface;
    }

    pub fn intersection_surface(&self) -> Option<SurfaceHandle> {
        self.intersection_surface
    }

    pub fn set_display_surface(&mut self, surface: Option<SurfaceHandle>) {
        self.display_surface = surface;
    }

    pub fn display_surface(&self) -> Option<SurfaceHandle> {
        self.display_surface
    }

    pub fn last_installed(&self) -> Option<InstalledSlot> {
        self.last_installed
    }

    pub fn last_probe(&self) -> Option<P> {
        self.last_probe
    }

    pub fn set_last_probe(&mut self, probe: Option<P>) {
        self.last_probe = probe;
    }

    pub fn history(&self) -> &[P] {
        &self.history
    }

    pub fn history_count(&self) -> usize {
        self.history.len()
    }

    pub fn history_at(&self, index: usize) -> Option<P> {
        self.history.get(index).copied()
    }

    /// Forget history and the last install
    ///
    /// The slot is not deleted; the repository may already have dropped it.
    pub fn reset(&mut self) {
        self.history.clear();
        self.last_installed = None;
        self.last_probe = None;
    }

    /// Clear selections that no longer resolve in `data`
    pub fn update(&mut self, data: &dyn BrainDataSet) {
        if self.anatomy_volume.is_some_and(|v| !data.has_volume(v)) {
            debug!("[AUTOLOAD] Anatomy volume {:?} is gone", self.anatomy_volume);
            self.anatomy_volume = None;
        }
        if self.intersection_surface.is_some_and(|s| !data.has_surface(s)) {
            self.intersection_surface = None;
        }
        if self.display_surface.is_some_and(|s| !data.has_surface(s)) {
            self.display_surface = None;
        }
    }

    pub(crate) fn push_history(&mut self, probe: P) {
        self.history.push(probe);
    }

    pub(crate) fn take_history(&mut self) -> Vec<P> {
        std::mem::take(&mut self.history)
    }

    pub(crate) fn set_history(&mut self, history: Vec<P>) {
        self.history = history;
    }

    pub(crate) fn install(&mut self, slot: InstalledSlot) {
        self.last_installed = Some(slot);
    }

    /// Delete the previous install when the replace policy is on
    pub(crate) fn release_last(&mut self, files: &mut dyn FileRepository) {
        if !self.replace_last {
            return;
        }
        if let Some(slot) = self.last_installed.take() {
            debug!("[AUTOLOAD] Replacing {}", slot);
            files.delete_slot(slot);
        }
    }
}
