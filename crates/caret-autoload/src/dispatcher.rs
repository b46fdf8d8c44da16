// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

use caret_structures::{NodeIndex, VolumeHandle, VoxelIJK, Xyz};
use tracing::debug;

use crate::context::AutoLoadContext;
use crate::error::DispatchReport;
use crate::manager::AutoLoaderManager;

/// What the user clicked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pick {
    /// A node on a surface
    Node(NodeIndex),
    /// A voxel of the underlay volume in a volume view
    UnderlayVoxel { volume: VolumeHandle, voxel: VoxelIJK },
    /// A raw world coordinate
    World(Xyz),
}

/// Routes picks to the manager's node or voxel path
pub struct ProbeDispatcher<'m> {
    manager: &'m mut AutoLoaderManager,
}

impl<'m> ProbeDispatcher<'m> {
    pub fn new(manager: &'m mut AutoLoaderManager) -> Self {
        Self { manager }
    }

    /// Returns `None` when nothing was dispatched: no loader is enabled, or
    /// the picked voxel has no world coordinate.
    pub fn dispatch(&mut self, pick: Pick, ctx: &mut AutoLoadContext<'_>) -> Option<DispatchReport> {
        if !self.manager.any_loader_enabled() {
            return None;
        }
        match pick {
            Pick::Node(node) => Some(self.manager.dispatch_node_probe(node, ctx)),
            Pick::UnderlayVoxel { volume, voxel } => {
                let Some(xyz) = ctx.data.coordinate_for_voxel(volume, voxel) else {
                    debug!("[AUTOLOAD] Picked voxel {} has no coordinate in {}", voxel, volume);
                    return None;
                };
                Some(self.manager.dispatch_voxel_probe(xyz, ctx))
            }
            Pick::World(xyz) => Some(self.manager.dispatch_voxel_probe(xyz, ctx)),
        }
    }
}
