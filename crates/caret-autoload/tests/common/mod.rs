// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! In-memory host doubles that record every repository and coloring call.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use caret_autoload::{
    AutoLoadContext, BrainDataSet, ColoringState, FileRepository, InstalledSlot, OverlayPromotion,
    RepositoryError,
};
use caret_structures::{NodeIndex, PaintColumnHandle, SurfaceHandle, VolumeHandle, VoxelIJK, Xyz};

pub const ANATOMY: VolumeHandle = VolumeHandle::new(1);
pub const SURFACE: SurfaceHandle = SurfaceHandle::new(10);
pub const PAINT: PaintColumnHandle = PaintColumnHandle::new(20);

/// Anatomy voxels are world coordinates shifted by `offset`, inside a 64^3 grid
pub struct FakeBrain {
    pub offset: [i32; 3],
    pub nodes: Vec<Xyz>,
    pub paint: Vec<i32>,
    pub volumes: HashMap<VolumeHandle, String>,
    pub surfaces: HashMap<SurfaceHandle, String>,
    pub paint_columns: HashMap<PaintColumnHandle, String>,
}

impl Default for FakeBrain {
    fn default() -> Self {
        let mut nodes = vec![[0.0; 3]; 8];
        nodes[5] = [1.0, 2.0, 3.0];
        Self {
            offset: [3, 3, 3],
            nodes,
            paint: vec![0, 2, 2, -1, 7, 2, 0, 2],
            volumes: HashMap::from([(ANATOMY, "anatomy.nii.gz".to_string())]),
            surfaces: HashMap::from([(SURFACE, "fiducial.coord".to_string())]),
            paint_columns: HashMap::from([(PAINT, "clusters".to_string())]),
        }
    }
}

impl BrainDataSet for FakeBrain {
    fn voxel_for_coordinate(&self, volume: VolumeHandle, xyz: Xyz) -> Option<VoxelIJK> {
        if !self.volumes.contains_key(&volume) {
            return None;
        }
        let mut ijk = [0i32; 3];
        for axis in 0..3 {
            let c = xyz[axis].floor() as i32 + self.offset[axis];
            if !(0..64).contains(&c) {
                return None;
            }
            ijk[axis] = c;
        }
        Some(VoxelIJK::from_array(ijk))
    }

    fn coordinate_for_voxel(&self, volume: VolumeHandle, voxel: VoxelIJK) -> Option<Xyz> {
        if !self.volumes.contains_key(&volume) || !voxel.is_valid() {
            return None;
        }
        let v = voxel.as_array();
        Some([
            (v[0] - self.offset[0]) as f32,
            (v[1] - self.offset[1]) as f32,
            (v[2] - self.offset[2]) as f32,
        ])
    }

    fn node_coordinate(&self, surface: SurfaceHandle, node: NodeIndex) -> Option<Xyz> {
        if !self.surfaces.contains_key(&surface) {
            return None;
        }
        self.nodes.get(node).copied()
    }

    fn number_of_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn paint_label_at(&self, column: PaintColumnHandle, node: NodeIndex) -> Option<i32> {
        if !self.paint_columns.contains_key(&column) {
            return None;
        }
        self.paint.get(node).copied()
    }

    fn volume_name(&self, volume: VolumeHandle) -> Option<String> {
        self.volumes.get(&volume).cloned()
    }

    fn volume_by_name(&self, name: &str) -> Option<VolumeHandle> {
        self.volumes.iter().find(|(_, n)| *n == name).map(|(h, _)| *h)
    }

    fn surface_name(&self, surface: SurfaceHandle) -> Option<String> {
        self.surfaces.get(&surface).cloned()
    }

    fn surface_by_name(&self, name: &str) -> Option<SurfaceHandle> {
        self.surfaces.iter().find(|(_, n)| *n == name).map(|(h, _)| *h)
    }

    fn paint_column_name(&self, column: PaintColumnHandle) -> Option<String> {
        self.paint_columns.get(&column).cloned()
    }

    fn paint_column_by_name(&self, name: &str) -> Option<PaintColumnHandle> {
        self.paint_columns
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(h, _)| *h)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCall {
    ReadMetric(PathBuf),
    ReadVolume(PathBuf),
    Delete(InstalledSlot),
}

/// Reads succeed for files that exist on disk; slots are numbered from 1
#[derive(Debug, Default)]
pub struct RecordingRepository {
    pub calls: Vec<RepoCall>,
    next_slot: u64,
}

impl RecordingRepository {
    fn install(&mut self, path: &Path) -> Result<InstalledSlot, RepositoryError> {
        if !path.is_file() {
            return Err(RepositoryError::new(format!(
                "Unable to open {}",
                path.display()
            )));
        }
        self.next_slot += 1;
        Ok(InstalledSlot::new(self.next_slot))
    }

    pub fn deletes(&self) -> Vec<InstalledSlot> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RepoCall::Delete(slot) => Some(*slot),
                _ => None,
            })
            .collect()
    }
}

impl FileRepository for RecordingRepository {
    fn read_metric_column(&mut self, path: &Path) -> Result<InstalledSlot, RepositoryError> {
        self.calls.push(RepoCall::ReadMetric(path.to_path_buf()));
        self.install(path)
    }

    fn read_functional_volume(&mut self, path: &Path) -> Result<InstalledSlot, RepositoryError> {
        self.calls.push(RepoCall::ReadVolume(path.to_path_buf()));
        self.install(path)
    }

    fn delete_slot(&mut self, slot: InstalledSlot) {
        self.calls.push(RepoCall::Delete(slot));
    }
}

#[derive(Debug, Default)]
pub struct RecordingColoring {
    pub promotions: Vec<OverlayPromotion>,
    pub highlights: Vec<Vec<NodeIndex>>,
    /// Nodes highlighted right now
    pub highlighted: Vec<NodeIndex>,
    pub clears: usize,
}

impl ColoringState for RecordingColoring {
    fn promote_overlay(&mut self, promotion: OverlayPromotion) {
        self.promotions.push(promotion);
    }

    fn highlight_nodes(&mut self, nodes: &[NodeIndex]) {
        self.highlights.push(nodes.to_vec());
        self.highlighted.extend_from_slice(nodes);
    }

    fn clear_highlights(&mut self) {
        self.clears += 1;
        self.highlighted.clear();
    }
}

/// Host doubles bundled so tests can build a context in one line
#[derive(Default)]
pub struct Host {
    pub brain: FakeBrain,
    pub repo: RecordingRepository,
    pub coloring: RecordingColoring,
}

impl Host {
    pub fn ctx(&mut self) -> AutoLoadContext<'_> {
        AutoLoadContext::new(&self.brain, &mut self.repo, &mut self.coloring)
    }
}

/// Create empty files in `dir`
pub fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), b"").unwrap();
    }
}
