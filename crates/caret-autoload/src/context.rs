// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Host collaborators.
//!
//! Loaders never own brain data, files or display state. Every dispatch gets
//! an [`AutoLoadContext`] borrowing the three host services below.

use std::path::Path;

use caret_structures::{
    define_handle, NodeIndex, PaintColumnHandle, SurfaceHandle, VolumeHandle, VoxelIJK, Xyz,
};

use crate::error::RepositoryError;

define_handle!(
    InstalledSlot,
    u64,
    "slot",
    "Opaque handle to a metric column or functional volume installed by the file repository."
);

/// Read-only view of the loaded brain data
pub trait BrainDataSet {
    /// Voxel of `volume` containing the world coordinate, if inside the volume
    fn voxel_for_coordinate(&self, volume: VolumeHandle, xyz: Xyz) -> Option<VoxelIJK>;

    /// World coordinate of a voxel center
    fn coordinate_for_voxel(&self, volume: VolumeHandle, voxel: VoxelIJK) -> Option<Xyz>;

    /// Coordinate of `node` on `surface`
    fn node_coordinate(&self, surface: SurfaceHandle, node: NodeIndex) -> Option<Xyz>;

    /// Number of nodes in the loaded topology
    fn number_of_nodes(&self) -> usize;

    /// Paint label of `node` in `column`
    fn paint_label_at(&self, column: PaintColumnHandle, node: NodeIndex) -> Option<i32>;

    fn volume_name(&self, volume: VolumeHandle) -> Option<String>;
    fn volume_by_name(&self, name: &str) -> Option<VolumeHandle>;
    fn surface_name(&self, surface: SurfaceHandle) -> Option<String>;
    fn surface_by_name(&self, name: &str) -> Option<SurfaceHandle>;
    fn paint_column_name(&self, column: PaintColumnHandle) -> Option<String>;
    fn paint_column_by_name(&self, name: &str) -> Option<PaintColumnHandle>;

    fn has_volume(&self, volume: VolumeHandle) -> bool {
        self.volume_name(volume).is_some()
    }

    fn has_surface(&self, surface: SurfaceHandle) -> bool {
        self.surface_name(surface).is_some()
    }

    fn has_paint_column(&self, column: PaintColumnHandle) -> bool {
        self.paint_column_name(column).is_some()
    }
}

/// Reads data files into host-owned slots
pub trait FileRepository {
    /// Append the metric file as a new column
    fn read_metric_column(&mut self, path: &Path) -> Result<InstalledSlot, RepositoryError>;

    /// Load the volume file as a new functional volume
    fn read_functional_volume(&mut self, path: &Path) -> Result<InstalledSlot, RepositoryError>;

    /// Remove a previously installed slot
    fn delete_slot(&mut self, slot: InstalledSlot);

    /// File names in `dir`, in enumeration order
    fn list_directory(&self, dir: &Path) -> Result<Vec<String>, RepositoryError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn is_directory(&self, dir: &Path) -> bool {
        dir.is_dir()
    }
}

/// Kind of overlay a successful load promotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Metric,
    FunctionalVolume,
}

/// Request to make freshly loaded data the primary overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayPromotion {
    pub kind: OverlayKind,
    pub slot: InstalledSlot,
    pub display_surface: Option<SurfaceHandle>,
}

/// Display state shared with the renderer
pub trait ColoringState {
    fn promote_overlay(&mut self, promotion: OverlayPromotion);

    /// Highlight nodes belonging to the cluster that was just loaded
    fn highlight_nodes(&mut self, nodes: &[NodeIndex]);

    /// Drop every node highlight left by an earlier probe
    fn clear_highlights(&mut self);
}

/// Everything a loader may touch during one dispatch
pub struct AutoLoadContext<'a> {
    pub data: &'a dyn BrainDataSet,
    pub files: &'a mut dyn FileRepository,
    pub coloring: &'a mut dyn ColoringState,
}

impl<'a> AutoLoadContext<'a> {
    pub fn new(
        data: &'a dyn BrainDataSet,
        files: &'a mut dyn FileRepository,
        coloring: &'a mut dyn ColoringState,
    ) -> Self {
        Self {
            data,
            files,
            coloring,
        }
    }
}
