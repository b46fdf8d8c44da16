// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Paint-cluster loader.
//!
//! A node probe is turned into the paint label of that node on the display
//! surface. The label names two files, `<prefix><L><metric-ext>` in the metric
//! directory and `<prefix><L><volume-ext>` in the secondary (functional volume)
//! directory; either, both or neither may exist.

use std::path::{Path, PathBuf};

use caret_config::AutoLoadConfig;
use caret_structures::{NodeIndex, PaintColumnHandle};
use tracing::debug;

use crate::context::{AutoLoadContext, BrainDataSet, InstalledSlot, OverlayKind};
use crate::error::{AutoLoadError, AutoLoadResult};
use crate::loader::{promote, read_artifact, AutoLoader};
use crate::pattern::cluster_file_name;
use crate::scene::SceneInfo;
use crate::state::{AutoLoaderState, LoadPolicy};

/// Scene info name of the paint column selection
pub const PAINT_COLUMN_INFO: &str = "paintColumn";

#[derive(Debug, Clone)]
pub struct ClusterLoader {
    state: AutoLoaderState<NodeIndex>,
    paint_column: Option<PaintColumnHandle>,
    last_volume_slot: Option<InstalledSlot>,
    file_prefix: String,
    metric_extension: String,
    volume_extension: String,
    policy: LoadPolicy,
}

impl ClusterLoader {
    pub fn new(config: &AutoLoadConfig) -> Self {
        Self {
            state: AutoLoaderState::new(),
            paint_column: None,
            last_volume_slot: None,
            file_prefix: config.cluster_file_prefix.clone(),
            metric_extension: config.metric_extension.clone(),
            volume_extension: config.volume_extension.clone(),
            policy: LoadPolicy::from_config(config),
        }
    }

    pub fn set_paint_column(&mut self, column: Option<PaintColumnHandle>) {
        self.paint_column = column;
    }

    pub fn paint_column(&self) -> Option<PaintColumnHandle> {
        self.paint_column
    }

    /// Last installed metric column
    pub fn last_metric_slot(&self) -> Option<InstalledSlot> {
        self.state.last_installed()
    }

    /// Last installed functional volume
    pub fn last_volume_slot(&self) -> Option<InstalledSlot> {
        self.last_volume_slot
    }

    /// Metric and volume file names for paint label `label`
    pub fn file_names(&self, label: i32) -> (String, String) {
        (
            cluster_file_name(&self.file_prefix, label, &self.metric_extension),
            cluster_file_name(&self.file_prefix, label, &self.volume_extension),
        )
    }

    fn check_prerequisites(
        &self,
        node: NodeIndex,
        data: &dyn BrainDataSet,
    ) -> AutoLoadResult<(PaintColumnHandle, i32)> {
        if self.state.display_surface().is_none() {
            return Err(AutoLoadError::ConfigMissing(
                "needs a display surface".to_string(),
            ));
        }
        let column = self
            .paint_column
            .filter(|c| data.has_paint_column(*c))
            .ok_or_else(|| AutoLoadError::ConfigMissing("needs a paint column".to_string()))?;

        if self.state.directory().as_os_str().is_empty()
            && self.state.secondary_directory().as_os_str().is_empty()
        {
            return Err(AutoLoadError::PathInvalid(
                "Both metric and functional volume directory names are empty".to_string(),
            ));
        }

        if node >= data.number_of_nodes() {
            return Err(AutoLoadError::BadProbe(format!("node {} is out of range", node)));
        }
        match data.paint_label_at(column, node) {
            Some(label) if label >= 0 => Ok((column, label)),
            _ => Err(AutoLoadError::BadProbe(format!(
                "no cluster for node {} with invalid paint index",
                node
            ))),
        }
    }

    fn release_slots(&mut self, ctx: &mut AutoLoadContext<'_>) {
        if !self.state.replace_last() {
            return;
        }
        self.state.release_last(ctx.files);
        if let Some(slot) = self.last_volume_slot.take() {
            debug!("[AUTOLOAD] Replacing cluster volume {}", slot);
            ctx.files.delete_slot(slot);
        }
    }

    /// Read one artifact from `directory`; `Ok(None)` when the directory is not configured
    fn load_artifact(
        directory: &Path,
        file_name: &str,
        what: &str,
        kind: OverlayKind,
        ctx: &mut AutoLoadContext<'_>,
    ) -> AutoLoadResult<Option<InstalledSlot>> {
        if directory.as_os_str().is_empty() {
            return Ok(None);
        }
        if !ctx.files.is_directory(directory) {
            return Err(AutoLoadError::PathInvalid(format!(
                "{} directory \"{}\" is invalid",
                what,
                directory.display()
            )));
        }
        let path: PathBuf = directory.join(file_name);
        read_artifact(ctx.files, kind, &path)
            .map(Some)
            .map_err(|e| AutoLoadError::ReadFailed(e.message))
    }

    /// Every other node carrying `label` in `column`
    fn cluster_members(
        data: &dyn BrainDataSet,
        column: PaintColumnHandle,
        label: i32,
        probed: NodeIndex,
    ) -> Vec<NodeIndex> {
        (0..data.number_of_nodes())
            .filter(|&n| n != probed && data.paint_label_at(column, n) == Some(label))
            .collect()
    }
}

impl AutoLoader for ClusterLoader {
    type Probe = NodeIndex;

    fn state(&self) -> &AutoLoaderState<NodeIndex> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AutoLoaderState<NodeIndex> {
        &mut self.state
    }

    fn load_for_node(&mut self, node: NodeIndex, ctx: &mut AutoLoadContext<'_>) -> AutoLoadResult<()> {
        if !self.state.enabled() {
            return Ok(());
        }
        if node < ctx.data.number_of_nodes() {
            ctx.coloring.clear_highlights();
        }
        let (column, label) = match self.check_prerequisites(node, ctx.data) {
            Ok(found) => found,
            Err(err) => {
                self.state.set_last_probe(None);
                return Err(err);
            }
        };
        self.state.set_last_probe(Some(node));
        self.release_slots(ctx);

        let (metric_name, volume_name) = self.file_names(label);
        let display_surface = self.state.display_surface();
        let mut errors = Vec::new();
        let mut loaded_any = false;

        let metric_dir = self.state.directory().to_path_buf();
        match Self::load_artifact(&metric_dir, &metric_name, "metric", OverlayKind::Metric, ctx) {
            Ok(Some(slot)) => {
                debug!("[AUTOLOAD] Cluster {} metric installed as {}", label, slot);
                self.state.install(slot);
                loaded_any = true;
                promote(ctx, &self.policy, OverlayKind::Metric, slot, display_surface);
                let members = Self::cluster_members(ctx.data, column, label, node);
                ctx.coloring.highlight_nodes(&members);
            }
            Ok(None) => {}
            Err(err) => errors.push(err),
        }

        let volume_dir = self.state.secondary_directory().to_path_buf();
        match Self::load_artifact(
            &volume_dir,
            &volume_name,
            "functional volume",
            OverlayKind::FunctionalVolume,
            ctx,
        ) {
            Ok(Some(slot)) => {
                debug!("[AUTOLOAD] Cluster {} volume installed as {}", label, slot);
                self.last_volume_slot = Some(slot);
                loaded_any = true;
                promote(ctx, &self.policy, OverlayKind::FunctionalVolume, slot, display_surface);
            }
            Ok(None) => {}
            Err(err) => errors.push(err),
        }

        if loaded_any || self.policy.record_failed_attempts {
            self.state.push_history(node);
        }
        AutoLoadError::collect(errors)
    }

    fn is_node_load_supported(&self) -> bool {
        true
    }

    fn load_probe(&mut self, probe: NodeIndex, ctx: &mut AutoLoadContext<'_>) -> AutoLoadResult<()> {
        self.load_for_node(probe, ctx)
    }

    fn reset(&mut self) {
        self.state.reset();
        self.last_volume_slot = None;
    }

    fn update(&mut self, data: &dyn BrainDataSet) {
        self.state.update(data);
        if self.paint_column.is_some_and(|c| !data.has_paint_column(c)) {
            self.paint_column = None;
        }
    }

    fn extra_scene_infos(&self, data: &dyn BrainDataSet) -> Vec<SceneInfo> {
        self.paint_column
            .and_then(|c| data.paint_column_name(c))
            .map(|name| vec![SceneInfo::new(PAINT_COLUMN_INFO, name)])
            .unwrap_or_default()
    }

    fn apply_extra_scene_info(&mut self, info: &SceneInfo, data: &dyn BrainDataSet) -> bool {
        if info.name != PAINT_COLUMN_INFO {
            return false;
        }
        self.paint_column = data.paint_column_by_name(&info.value);
        true
    }
}
