// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Owner of every loader; routes probes through them in a fixed order.
//!
//! Families are walked as metric-by-node, metric-by-voxel, functional volume,
//! cluster, and by index within a family. The order shows in the report.

use std::fmt::{Display, Formatter};

use caret_config::AutoLoadConfig;
use caret_structures::{NodeIndex, Xyz};
use tracing::{debug, info, warn};

use crate::cluster::ClusterLoader;
use crate::context::{AutoLoadContext, BrainDataSet};
use crate::error::{AutoLoadResult, DispatchReport};
use crate::loader::AutoLoader;
use crate::metric_node::MetricNodeLoader;
use crate::scene::{restore_loader, save_loader, Scene};
use crate::voxel_keyed::{FunctionalVolumeLoader, MetricVoxelLoader, VoxelArtifact, VoxelKeyedLoader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LoaderFamily {
    MetricNode,
    MetricVoxel,
    FunctionalVolume,
    Cluster,
}

impl LoaderFamily {
    pub const DISPATCH_ORDER: [LoaderFamily; 4] = [
        LoaderFamily::MetricNode,
        LoaderFamily::MetricVoxel,
        LoaderFamily::FunctionalVolume,
        LoaderFamily::Cluster,
    ];

    /// Name shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            LoaderFamily::MetricNode => "Auto Load Metric By Node",
            LoaderFamily::MetricVoxel => "Auto Load Metric",
            LoaderFamily::FunctionalVolume => "Auto Load Functional Volume",
            LoaderFamily::Cluster => "Auto Load Cluster",
        }
    }

    /// Tag used in scene class names
    pub fn scene_tag(&self) -> &'static str {
        match self {
            LoaderFamily::MetricNode => "metric-node",
            LoaderFamily::MetricVoxel => "metric-voxel",
            LoaderFamily::FunctionalVolume => "functional-volume",
            LoaderFamily::Cluster => "cluster",
        }
    }

    pub fn from_scene_tag(tag: &str) -> Option<Self> {
        Self::DISPATCH_ORDER
            .into_iter()
            .find(|family| family.scene_tag() == tag)
    }
}

/// One loader: family plus 0-based index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoaderId {
    pub family: LoaderFamily,
    pub index: usize,
}

impl LoaderId {
    pub const fn new(family: LoaderFamily, index: usize) -> Self {
        Self { family, index }
    }

    /// `<family-tag>:<index>`
    pub fn scene_class_name(&self) -> String {
        format!("{}:{}", self.family.scene_tag(), self.index)
    }

    pub fn from_scene_class_name(name: &str) -> Option<Self> {
        let (tag, index) = name.split_once(':')?;
        Some(Self::new(
            LoaderFamily::from_scene_tag(tag)?,
            index.parse().ok()?,
        ))
    }
}

impl Display for LoaderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.family.label(), self.index + 1)
    }
}

#[derive(Debug, Clone)]
pub struct AutoLoaderManager {
    metric_voxel: Vec<MetricVoxelLoader>,
    metric_node: Vec<MetricNodeLoader>,
    functional_volume: Vec<FunctionalVolumeLoader>,
    cluster: Vec<ClusterLoader>,
    replay_history_on_restore: bool,
}

fn voxel_family<A: VoxelArtifact>(
    count: usize,
    config: &AutoLoadConfig,
) -> AutoLoadResult<Vec<VoxelKeyedLoader<A>>> {
    (0..count).map(|_| VoxelKeyedLoader::new(config)).collect()
}

impl AutoLoaderManager {
    pub fn new(config: &AutoLoadConfig) -> AutoLoadResult<Self> {
        let metric_node = (0..config.metric_node_loaders)
            .map(|_| MetricNodeLoader::new(config))
            .collect::<AutoLoadResult<Vec<_>>>()?;
        let cluster = (0..config.cluster_loaders)
            .map(|_| ClusterLoader::new(config))
            .collect();

        info!(
            "[AUTOLOAD] Loaders: {} metric, {} metric-by-node, {} functional volume, {} cluster",
            config.metric_voxel_loaders,
            config.metric_node_loaders,
            config.functional_volume_loaders,
            config.cluster_loaders
        );

        Ok(Self {
            metric_voxel: voxel_family(config.metric_voxel_loaders, config)?,
            metric_node,
            functional_volume: voxel_family(config.functional_volume_loaders, config)?,
            cluster,
            replay_history_on_restore: config.replay_history_on_restore,
        })
    }

    pub fn family_size(&self, family: LoaderFamily) -> usize {
        match family {
            LoaderFamily::MetricNode => self.metric_node.len(),
            LoaderFamily::MetricVoxel => self.metric_voxel.len(),
            LoaderFamily::FunctionalVolume => self.functional_volume.len(),
            LoaderFamily::Cluster => self.cluster.len(),
        }
    }

    pub fn metric_voxel_loader(&self, index: usize) -> Option<&MetricVoxelLoader> {
        self.metric_voxel.get(index)
    }

    pub fn metric_voxel_loader_mut(&mut self, index: usize) -> Option<&mut MetricVoxelLoader> {
        self.metric_voxel.get_mut(index)
    }

    pub fn metric_node_loader(&self, index: usize) -> Option<&MetricNodeLoader> {
        self.metric_node.get(index)
    }

    pub fn metric_node_loader_mut(&mut self, index: usize) -> Option<&mut MetricNodeLoader> {
        self.metric_node.get_mut(index)
    }

    pub fn functional_volume_loader(&self, index: usize) -> Option<&FunctionalVolumeLoader> {
        self.functional_volume.get(index)
    }

    pub fn functional_volume_loader_mut(
        &mut self,
        index: usize,
    ) -> Option<&mut FunctionalVolumeLoader> {
        self.functional_volume.get_mut(index)
    }

    pub fn cluster_loader(&self, index: usize) -> Option<&ClusterLoader> {
        self.cluster.get(index)
    }

    pub fn cluster_loader_mut(&mut self, index: usize) -> Option<&mut ClusterLoader> {
        self.cluster.get_mut(index)
    }

    pub fn replay_history_on_restore(&self) -> bool {
        self.replay_history_on_restore
    }

    pub fn set_replay_history_on_restore(&mut self, replay: bool) {
        self.replay_history_on_restore = replay;
    }

    pub fn any_loader_enabled(&self) -> bool {
        self.metric_voxel.iter().any(|l| l.is_enabled())
            || self.metric_node.iter().any(|l| l.is_enabled())
            || self.functional_volume.iter().any(|l| l.is_enabled())
            || self.cluster.iter().any(|l| l.is_enabled())
    }

    /// Probe at a world coordinate; only voxel-keyed loaders take part
    pub fn dispatch_voxel_probe(&mut self, xyz: Xyz, ctx: &mut AutoLoadContext<'_>) -> DispatchReport {
        debug!("[AUTOLOAD] Voxel probe at {:?}", xyz);
        let mut report = DispatchReport::new();

        for (i, loader) in self.metric_voxel.iter_mut().enumerate() {
            if loader.is_enabled() {
                let id = LoaderId::new(LoaderFamily::MetricVoxel, i);
                report.record(id, loader.probe_coordinate(xyz, ctx));
            }
        }
        for (i, loader) in self.functional_volume.iter_mut().enumerate() {
            if loader.is_enabled() {
                let id = LoaderId::new(LoaderFamily::FunctionalVolume, i);
                report.record(id, loader.probe_coordinate(xyz, ctx));
            }
        }

        log_failures(&report);
        report
    }

    /// Probe at a surface node; every family takes part
    pub fn dispatch_node_probe(
        &mut self,
        node: NodeIndex,
        ctx: &mut AutoLoadContext<'_>,
    ) -> DispatchReport {
        debug!("[AUTOLOAD] Node probe at {}", node);
        let mut report = DispatchReport::new();

        for (i, loader) in self.metric_node.iter_mut().enumerate() {
            if loader.is_enabled() {
                let id = LoaderId::new(LoaderFamily::MetricNode, i);
                report.record(id, loader.load_for_node(node, ctx));
            }
        }
        for (i, loader) in self.metric_voxel.iter_mut().enumerate() {
            if loader.is_enabled() {
                let id = LoaderId::new(LoaderFamily::MetricVoxel, i);
                report.record(id, loader.probe_node_on_surface(node, ctx));
            }
        }
        for (i, loader) in self.functional_volume.iter_mut().enumerate() {
            if loader.is_enabled() {
                let id = LoaderId::new(LoaderFamily::FunctionalVolume, i);
                report.record(id, loader.probe_node_on_surface(node, ctx));
            }
        }
        for (i, loader) in self.cluster.iter_mut().enumerate() {
            if loader.is_enabled() {
                let id = LoaderId::new(LoaderFamily::Cluster, i);
                report.record(id, loader.load_for_node(node, ctx));
            }
        }

        log_failures(&report);
        report
    }

    /// Forget every loader's history and last install
    pub fn reset(&mut self) {
        self.metric_voxel.iter_mut().for_each(|l| l.reset());
        self.metric_node.iter_mut().for_each(|l| l.reset());
        self.functional_volume.iter_mut().for_each(|l| l.reset());
        self.cluster.iter_mut().for_each(|l| l.reset());
    }

    /// Drop selections of data the host no longer has
    pub fn update(&mut self, data: &dyn BrainDataSet) {
        self.metric_voxel.iter_mut().for_each(|l| l.update(data));
        self.metric_node.iter_mut().for_each(|l| l.update(data));
        self.functional_volume.iter_mut().for_each(|l| l.update(data));
        self.cluster.iter_mut().for_each(|l| l.update(data));
    }

    /// Scene record of every loader, or only the enabled ones
    pub fn save_state(&self, data: &dyn BrainDataSet, only_if_enabled: bool) -> Scene {
        let mut scene = Scene::new();
        save_family(&mut scene, LoaderFamily::MetricNode, &self.metric_node, data, only_if_enabled);
        save_family(&mut scene, LoaderFamily::MetricVoxel, &self.metric_voxel, data, only_if_enabled);
        save_family(
            &mut scene,
            LoaderFamily::FunctionalVolume,
            &self.functional_volume,
            data,
            only_if_enabled,
        );
        save_family(&mut scene, LoaderFamily::Cluster, &self.cluster, data, only_if_enabled);
        scene
    }

    /// Reset, apply the scene, then replay restored history if configured
    pub fn restore_state(&mut self, scene: &Scene, ctx: &mut AutoLoadContext<'_>) -> DispatchReport {
        self.reset();

        for class in &scene.classes {
            let in_range = LoaderId::from_scene_class_name(&class.name)
                .is_some_and(|id| id.index < self.family_size(id.family));
            if !in_range {
                warn!("[AUTOLOAD] Scene class '{}' matches no loader", class.name);
            }
        }

        let replay = self.replay_history_on_restore;
        let mut report = DispatchReport::new();
        restore_family(&mut self.metric_node, LoaderFamily::MetricNode, scene, ctx, replay, &mut report);
        restore_family(&mut self.metric_voxel, LoaderFamily::MetricVoxel, scene, ctx, replay, &mut report);
        restore_family(
            &mut self.functional_volume,
            LoaderFamily::FunctionalVolume,
            scene,
            ctx,
            replay,
            &mut report,
        );
        restore_family(&mut self.cluster, LoaderFamily::Cluster, scene, ctx, replay, &mut report);

        log_failures(&report);
        report
    }
}

fn log_failures(report: &DispatchReport) {
    for failure in report.failures() {
        warn!("[AUTOLOAD] {}", failure);
    }
}

fn save_family<L: AutoLoader>(
    scene: &mut Scene,
    family: LoaderFamily,
    loaders: &[L],
    data: &dyn BrainDataSet,
    only_if_enabled: bool,
) {
    for (i, loader) in loaders.iter().enumerate() {
        if only_if_enabled && !loader.is_enabled() {
            continue;
        }
        let name = LoaderId::new(family, i).scene_class_name();
        scene.classes.push(save_loader(loader, &name, data));
    }
}

fn restore_family<L: AutoLoader>(
    loaders: &mut [L],
    family: LoaderFamily,
    scene: &Scene,
    ctx: &mut AutoLoadContext<'_>,
    replay: bool,
    report: &mut DispatchReport,
) {
    for (i, loader) in loaders.iter_mut().enumerate() {
        let id = LoaderId::new(family, i);
        let Some(class) = scene.class(&id.scene_class_name()) else {
            continue;
        };
        let history = restore_loader(loader, class, ctx.data);

        if replay && loader.is_enabled() {
            debug!("[AUTOLOAD] Replaying {} probes for {}", history.len(), id);
            for probe in history {
                report.record(id, loader.load_probe(probe, ctx));
            }
        } else {
            loader.state_mut().set_history(history);
        }
    }
}
