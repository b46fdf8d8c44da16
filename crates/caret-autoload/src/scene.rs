// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Scene save/restore of loader state.
//!
//! A scene holds one class per loader, named `<family-tag>:<index>`, carrying
//! name/value infos. Handles are stored by name and resolved again on restore.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::context::BrainDataSet;
use crate::loader::AutoLoader;
use crate::state::ProbeKey;

pub const ENABLED_INFO: &str = "enabled";
pub const DIRECTORY_INFO: &str = "directory";
pub const SECONDARY_DIRECTORY_INFO: &str = "secondaryDirectory";
pub const REPLACE_LAST_INFO: &str = "replaceLast";
pub const ANATOMY_VOLUME_INFO: &str = "anatomyVolume";
pub const INTERSECTION_SURFACE_INFO: &str = "intersectionSurface";
pub const DISPLAY_SURFACE_INFO: &str = "displaySurface";
pub const HISTORY_INFO: &str = "history";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneInfo {
    pub name: String,
    pub value: String,
}

impl SceneInfo {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneClass {
    pub name: String,
    pub infos: Vec<SceneInfo>,
}

impl SceneClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            infos: Vec::new(),
        }
    }

    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        self.infos.push(SceneInfo::new(name, value));
    }

    /// First info with `name`
    pub fn value(&self, name: &str) -> Option<&str> {
        self.infos
            .iter()
            .find(|info| info.name == name)
            .map(|info| info.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub classes: Vec<SceneClass>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&self, name: &str) -> Option<&SceneClass> {
        self.classes.iter().find(|c| c.name == name)
    }
}

fn bool_value(value: &str) -> bool {
    matches!(value.trim(), "true" | "1" | "yes")
}

/// Scene class for one loader
pub fn save_loader<L: AutoLoader>(loader: &L, class_name: &str, data: &dyn BrainDataSet) -> SceneClass {
    let state = loader.state();
    let mut class = SceneClass::new(class_name);
    class.push(ENABLED_INFO, state.enabled().to_string());
    class.push(DIRECTORY_INFO, state.directory().to_string_lossy());
    class.push(
        SECONDARY_DIRECTORY_INFO,
        state.secondary_directory().to_string_lossy(),
    );
    class.push(REPLACE_LAST_INFO, state.replace_last().to_string());
    if let Some(name) = state.anatomy_volume().and_then(|v| data.volume_name(v)) {
        class.push(ANATOMY_VOLUME_INFO, name);
    }
    if let Some(name) = state.intersection_surface().and_then(|s| data.surface_name(s)) {
        class.push(INTERSECTION_SURFACE_INFO, name);
    }
    if let Some(name) = state.display_surface().and_then(|s| data.surface_name(s)) {
        class.push(DISPLAY_SURFACE_INFO, name);
    }
    class.infos.extend(loader.extra_scene_infos(data));
    for probe in state.history() {
        class.push(HISTORY_INFO, probe.to_scene_value());
    }
    class
}

/// Apply a scene class to a loader that has just been reset
///
/// Returns the restored history in order; the caller decides whether to
/// replay it or keep it as is.
pub fn restore_loader<L: AutoLoader>(
    loader: &mut L,
    class: &SceneClass,
    data: &dyn BrainDataSet,
) -> Vec<L::Probe> {
    let mut history = Vec::new();
    for info in &class.infos {
        let value = info.value.as_str();
        match info.name.as_str() {
            ENABLED_INFO => loader.state_mut().set_enabled(bool_value(value)),
            DIRECTORY_INFO => loader.state_mut().set_directory(value),
            SECONDARY_DIRECTORY_INFO => loader.state_mut().set_secondary_directory(value),
            REPLACE_LAST_INFO => loader.state_mut().set_replace_last(bool_value(value)),
            ANATOMY_VOLUME_INFO => {
                let volume = data.volume_by_name(value);
                if volume.is_none() {
                    warn!("[AUTOLOAD] Scene volume '{}' is not loaded", value);
                }
                loader.state_mut().set_anatomy_volume(volume);
            }
            INTERSECTION_SURFACE_INFO => {
                let surface = data.surface_by_name(value);
                loader.state_mut().set_intersection_surface(surface);
            }
            DISPLAY_SURFACE_INFO => {
                let surface = data.surface_by_name(value);
                loader.state_mut().set_display_surface(surface);
            }
            HISTORY_INFO => match L::Probe::from_scene_value(value) {
                Some(probe) => history.push(probe),
                None => warn!("[AUTOLOAD] Ignoring bad history entry '{}' in {}", value, class.name),
            },
            _ => {
                if !loader.apply_extra_scene_info(info, data) {
                    warn!("[AUTOLOAD] Unknown scene info '{}' in {}", info.name, class.name);
                }
            }
        }
    }
    history
}
