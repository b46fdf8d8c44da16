// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Loaders keyed by anatomy voxel: metric columns and functional volumes.
//!
//! Both read the file `*_<i>_<j>_<k><volume-ext>` from their directory; they
//! differ only in what the repository installs and which overlay is promoted.

use std::marker::PhantomData;

use caret_config::AutoLoadConfig;
use caret_structures::{NodeIndex, VoxelIJK, Xyz};
use tracing::trace;

use crate::context::{AutoLoadContext, OverlayKind};
use crate::error::{AutoLoadError, AutoLoadResult};
use crate::loader::{load_matching_file, AutoLoader};
use crate::pattern::FileNamePattern;
use crate::state::{AutoLoaderState, LoadPolicy};

/// What a voxel-keyed loader installs
pub trait VoxelArtifact {
    const OVERLAY: OverlayKind;
}

#[derive(Debug, Clone, Copy)]
pub struct MetricColumn;

impl VoxelArtifact for MetricColumn {
    const OVERLAY: OverlayKind = OverlayKind::Metric;
}

#[derive(Debug, Clone, Copy)]
pub struct FunctionalVolume;

impl VoxelArtifact for FunctionalVolume {
    const OVERLAY: OverlayKind = OverlayKind::FunctionalVolume;
}

/// Loads a metric column per anatomy voxel
pub type MetricVoxelLoader = VoxelKeyedLoader<MetricColumn>;

/// Loads a functional volume per anatomy voxel
pub type FunctionalVolumeLoader = VoxelKeyedLoader<FunctionalVolume>;

#[derive(Debug, Clone)]
pub struct VoxelKeyedLoader<A: VoxelArtifact> {
    state: AutoLoaderState<VoxelIJK>,
    pattern: FileNamePattern,
    policy: LoadPolicy,
    _artifact: PhantomData<A>,
}

impl<A: VoxelArtifact> VoxelKeyedLoader<A> {
    pub fn new(config: &AutoLoadConfig) -> AutoLoadResult<Self> {
        Ok(Self {
            state: AutoLoaderState::new(),
            pattern: FileNamePattern::voxel(&config.volume_extension)?,
            policy: LoadPolicy::from_config(config),
            _artifact: PhantomData,
        })
    }

    pub fn policy(&self) -> &LoadPolicy {
        &self.policy
    }

    /// Voxel path of the manager: convert `xyz` against the anatomy volume
    ///
    /// A coordinate outside the volume leaves the invalid sentinel as the last
    /// probe and is not an error.
    pub fn probe_coordinate(&mut self, xyz: Xyz, ctx: &mut AutoLoadContext<'_>) -> AutoLoadResult<()> {
        if !self.state.enabled() {
            return Ok(());
        }
        let anatomy = self.state.anatomy_volume().ok_or_else(|| {
            AutoLoadError::ConfigMissing("needs an anatomical volume".to_string())
        })?;

        match ctx.data.voxel_for_coordinate(anatomy, xyz) {
            Some(voxel) => self.load_for_voxel(voxel, ctx),
            None => {
                trace!("[AUTOLOAD] {:?} is outside {}", xyz, anatomy);
                self.state.set_last_probe(None);
                Ok(())
            }
        }
    }

    /// Node path of the manager: node -> intersection surface coordinate -> voxel
    pub fn probe_node_on_surface(
        &mut self,
        node: NodeIndex,
        ctx: &mut AutoLoadContext<'_>,
    ) -> AutoLoadResult<()> {
        if !self.state.enabled() {
            return Ok(());
        }
        if self.state.anatomy_volume().is_none() {
            return Err(AutoLoadError::ConfigMissing(
                "needs an anatomical volume".to_string(),
            ));
        }
        let surface = self.state.intersection_surface().ok_or_else(|| {
            AutoLoadError::ConfigMissing("needs an intersection surface".to_string())
        })?;

        if node >= ctx.data.number_of_nodes() {
            self.state.set_last_probe(None);
            return Err(AutoLoadError::BadProbe(format!(
                "node {} is out of range",
                node
            )));
        }
        let xyz = ctx.data.node_coordinate(surface, node).ok_or_else(|| {
            AutoLoadError::BadProbe(format!("node {} has no coordinate on {}", node, surface))
        })?;
        self.probe_coordinate(xyz, ctx)
    }
}

impl<A: VoxelArtifact> AutoLoader for VoxelKeyedLoader<A> {
    type Probe = VoxelIJK;

    fn state(&self) -> &AutoLoaderState<VoxelIJK> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AutoLoaderState<VoxelIJK> {
        &mut self.state
    }

    fn load_for_voxel(&mut self, voxel: VoxelIJK, ctx: &mut AutoLoadContext<'_>) -> AutoLoadResult<()> {
        if !self.state.enabled() {
            return Ok(());
        }
        if !voxel.is_valid() {
            self.state.set_last_probe(None);
            return Err(AutoLoadError::BadProbe("invalid voxel".to_string()));
        }
        load_matching_file(&mut self.state, &self.policy, &self.pattern, A::OVERLAY, voxel, ctx)
    }

    fn load_probe(&mut self, probe: VoxelIJK, ctx: &mut AutoLoadContext<'_>) -> AutoLoadResult<()> {
        self.load_for_voxel(probe, ctx)
    }
}
