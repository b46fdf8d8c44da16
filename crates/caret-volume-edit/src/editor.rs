// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Paint editor dialog state.

use caret_config::VolumeEditConfig;
use caret_structures::{VolumeAxis, VoxelIJK};
use tracing::{debug, info};

use crate::brush::VoxelBrushEngine;
use crate::error::{BrushError, BrushResult};
use crate::grid::VolumeGrid;
use crate::modification::ModificationRecord;
use crate::names::{NameLookup, Rgb};

/// Whether the editor dialog is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Editing,
}

/// Brush engine plus the paint name chosen in the dialog
///
/// Clicks are only accepted while `Editing`. Opening or closing the dialog
/// always empties the undo stack.
#[derive(Debug)]
pub struct PaintEditor<G: VolumeGrid> {
    engine: VoxelBrushEngine<G>,
    state: EditorState,
    paint_name: String,
    default_color: Rgb,
}

impl<G: VolumeGrid> PaintEditor<G> {
    pub fn new(config: &VolumeEditConfig) -> Self {
        Self {
            engine: VoxelBrushEngine::from_config(config),
            state: EditorState::Idle,
            paint_name: String::new(),
            default_color: config.default_area_color,
        }
    }

    pub fn open(&mut self) {
        self.engine.clear_undo_stack();
        self.state = EditorState::Editing;
        info!("[PAINT-EDITOR] Opened");
    }

    pub fn close(&mut self) {
        self.engine.clear_undo_stack();
        self.state = EditorState::Idle;
        info!("[PAINT-EDITOR] Closed");
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == EditorState::Editing
    }

    pub fn engine(&self) -> &VoxelBrushEngine<G> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut VoxelBrushEngine<G> {
        &mut self.engine
    }

    pub fn paint_name(&self) -> &str {
        &self.paint_name
    }

    pub fn set_paint_name(&mut self, name: impl Into<String>) {
        self.paint_name = name.into();
    }

    /// Make sure the current paint name has an area color
    ///
    /// Returns true when a color was added.
    pub fn apply_paint_name(&self, colors: &mut dyn NameLookup) -> BrushResult<bool> {
        let name = self.paint_name.trim();
        if name.is_empty() {
            return Err(BrushError::MissingPaintName);
        }
        Ok(colors.ensure_color(name, self.default_color))
    }

    /// Paint the current paint name at `voxel`
    pub fn click(
        &mut self,
        voxel: VoxelIJK,
        picked_axis: Option<VolumeAxis>,
        colors: &mut dyn NameLookup,
    ) -> BrushResult<Option<&ModificationRecord>> {
        let name = self.paint_name.clone();
        self.paint_named(voxel, &name, picked_axis, colors)
    }

    /// Paint `name` at `voxel`, registering the name with the volume and the
    /// color table when either does not know it
    pub fn paint_named(
        &mut self,
        voxel: VoxelIJK,
        name: &str,
        picked_axis: Option<VolumeAxis>,
        colors: &mut dyn NameLookup,
    ) -> BrushResult<Option<&ModificationRecord>> {
        if !self.is_editing() {
            return Err(BrushError::NotEditing);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(BrushError::MissingPaintName);
        }
        // Rejected clicks must leave the name table untouched.
        self.engine.resolve_axis(picked_axis)?;
        self.engine.check_target(voxel)?;

        let grid = self.engine.grid_mut().ok_or(BrushError::NoGridAttached)?;
        let label = grid.label_for_name(name);
        if colors.ensure_color(name, self.default_color) {
            debug!("[PAINT-EDITOR] Added area color for '{}'", name);
        }
        self.engine.paint_picked(voxel, picked_axis, label)
    }

    pub fn undo(&mut self) -> bool {
        self.engine.undo()
    }
}
