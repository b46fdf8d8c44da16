// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! N x N x 1 voxel brush.
//!
//! The brush is a square of side `2r + 1` in the two axes perpendicular to the
//! active slice axis and one voxel thick along it. Each stroke that changes at
//! least one voxel leaves a [`ModificationRecord`] on the undo stack.

use caret_config::VolumeEditConfig;
use caret_structures::{VolumeAxis, VoxelIJK};
use tracing::{debug, trace};

use crate::error::{BrushError, BrushResult};
use crate::grid::{Label, VolumeGrid};
use crate::modification::{ModificationRecord, UndoStack};

/// Largest brush radius (11 x 11)
pub const MAX_BRUSH_RADIUS: u8 = 5;

/// Brush engine bound to one paint volume
#[derive(Debug)]
pub struct VoxelBrushEngine<G: VolumeGrid> {
    grid: Option<G>,
    radius: u8,
    slice_axis: VolumeAxis,
    undo_stack: UndoStack,
}

impl<G: VolumeGrid> VoxelBrushEngine<G> {
    pub fn new(max_undo_depth: usize) -> Self {
        Self {
            grid: None,
            radius: 0,
            slice_axis: VolumeAxis::Z,
            undo_stack: UndoStack::new(max_undo_depth),
        }
    }

    pub fn from_config(config: &VolumeEditConfig) -> Self {
        let mut engine = Self::new(config.max_undo_depth);
        engine.radius = config.default_brush_radius.min(MAX_BRUSH_RADIUS);
        engine
    }

    /// Attach the volume to paint, returning the previously attached one
    ///
    /// Records refer to the old volume, so the undo stack is cleared.
    pub fn attach(&mut self, grid: G) -> Option<G> {
        self.undo_stack.clear();
        self.grid.replace(grid)
    }

    pub fn detach(&mut self) -> Option<G> {
        self.undo_stack.clear();
        self.grid.take()
    }

    pub fn grid(&self) -> Option<&G> {
        self.grid.as_ref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut G> {
        self.grid.as_mut()
    }

    pub fn set_brush_size(&mut self, radius: u8) -> BrushResult<()> {
        if radius > MAX_BRUSH_RADIUS {
            return Err(BrushError::InvalidBrushSize(radius));
        }
        self.radius = radius;
        Ok(())
    }

    pub fn brush_size(&self) -> u8 {
        self.radius
    }

    /// Side length of the brush square
    pub fn brush_width(&self) -> u32 {
        2 * u32::from(self.radius) + 1
    }

    /// Axis of the view being edited; validated when painting
    pub fn set_active_slice_axis(&mut self, axis: VolumeAxis) {
        self.slice_axis = axis;
    }

    pub fn active_slice_axis(&self) -> VolumeAxis {
        self.slice_axis
    }

    /// Grid dimension the brush is flat in
    ///
    /// With `ALL` the face the user clicked decides.
    pub fn resolve_axis(&self, picked_axis: Option<VolumeAxis>) -> BrushResult<usize> {
        match self.slice_axis {
            VolumeAxis::All => picked_axis
                .and_then(|axis| axis.index())
                .ok_or(BrushError::AmbiguousAxis),
            axis => axis.index().ok_or(BrushError::AxisUnsupported(axis)),
        }
    }

    /// Inclusive brush cuboid around `voxel`, not yet clipped to the grid
    pub fn brush_bounds(&self, voxel: VoxelIJK, slice_axis: usize) -> ([i32; 3], [i32; 3]) {
        let r = i32::from(self.radius);
        let center = voxel.as_array();
        let mut min = center;
        let mut max = center;
        for axis in 0..3 {
            if axis != slice_axis {
                min[axis] = min[axis].saturating_sub(r);
                max[axis] = max[axis].saturating_add(r);
            }
        }
        (min, max)
    }

    /// A grid must be attached and contain `voxel`
    pub fn check_target(&self, voxel: VoxelIJK) -> BrushResult<()> {
        let grid = self.grid.as_ref().ok_or(BrushError::NoGridAttached)?;
        let dims = grid.dimensions();
        if !dims.contains(&voxel) {
            return Err(BrushError::OutOfBounds { voxel, dims });
        }
        Ok(())
    }

    /// Paint `label` centered on `voxel` with an orthogonal slice axis
    pub fn paint(
        &mut self,
        voxel: VoxelIJK,
        label: Label,
    ) -> BrushResult<Option<&ModificationRecord>> {
        self.paint_picked(voxel, None, label)
    }

    /// Paint `label` centered on `voxel`
    ///
    /// Returns the record pushed on the undo stack, or `None` when nothing
    /// changed (nothing is pushed then).
    pub fn paint_picked(
        &mut self,
        voxel: VoxelIJK,
        picked_axis: Option<VolumeAxis>,
        label: Label,
    ) -> BrushResult<Option<&ModificationRecord>> {
        let slice_axis = self.resolve_axis(picked_axis)?;
        self.check_target(voxel)?;
        let (min, max) = self.brush_bounds(voxel, slice_axis);
        let grid = self.grid.as_mut().ok_or(BrushError::NoGridAttached)?;
        let dims = grid.dimensions();

        let upper = dims.as_array();
        let clip = |axis: usize| -> (i32, i32) {
            (min[axis].max(0), max[axis].min(upper[axis] as i32 - 1))
        };
        let (i_lo, i_hi) = clip(0);
        let (j_lo, j_hi) = clip(1);
        let (k_lo, k_hi) = clip(2);

        let mut record = ModificationRecord::new();
        for i in i_lo..=i_hi {
            for j in j_lo..=j_hi {
                for k in k_lo..=k_hi {
                    let target = VoxelIJK::new(i, j, k);
                    match grid.label_at(target) {
                        Some(old) if old != label => {
                            grid.set_label(target, label);
                            record.push(target, old);
                        }
                        _ => {}
                    }
                }
            }
        }

        if record.is_empty() {
            trace!("[BRUSH] Stroke at {} changed nothing", voxel);
            return Ok(None);
        }

        debug!(
            "[BRUSH] Painted {} voxels with label {} at {} (radius {})",
            record.len(),
            label,
            voxel,
            self.radius
        );
        self.undo_stack.push(record);
        Ok(self.undo_stack.last())
    }

    /// Revert the most recent stroke; does nothing when the stack is empty
    pub fn undo(&mut self) -> bool {
        let Some(grid) = self.grid.as_mut() else {
            return false;
        };
        let Some(record) = self.undo_stack.pop() else {
            return false;
        };
        record.revert(grid);
        debug!(
            "[BRUSH] Undid stroke of {} voxels ({} left)",
            record.len(),
            self.undo_stack.len()
        );
        true
    }

    pub fn clear_undo_stack(&mut self) {
        self.undo_stack.clear();
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo_stack
    }
}
