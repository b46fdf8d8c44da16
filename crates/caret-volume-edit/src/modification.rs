// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Stroke records and the bounded undo stack.

use std::collections::VecDeque;

use caret_structures::VoxelIJK;

use crate::grid::{Label, VolumeGrid};

/// Voxels changed by one stroke, each with the label it had before
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModificationRecord {
    changes: Vec<(VoxelIJK, Label)>,
}

impl ModificationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, voxel: VoxelIJK, old_label: Label) {
        self.changes.push((voxel, old_label));
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(VoxelIJK, Label)> {
        self.changes.iter()
    }

    pub fn voxels(&self) -> impl Iterator<Item = VoxelIJK> + '_ {
        self.changes.iter().map(|(voxel, _)| *voxel)
    }

    /// Write every old label back into `grid`
    ///
    /// Applied in reverse so a voxel listed twice ends with its earliest label.
    pub fn revert<G: VolumeGrid + ?Sized>(&self, grid: &mut G) {
        for (voxel, old_label) in self.changes.iter().rev() {
            grid.set_label(*voxel, *old_label);
        }
    }
}

/// LIFO of stroke records holding at most `max_depth` entries
///
/// When full, pushing drops the oldest record.
#[derive(Debug, Clone)]
pub struct UndoStack {
    records: VecDeque<ModificationRecord>,
    max_depth: usize,
}

impl UndoStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            records: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn push(&mut self, record: ModificationRecord) {
        if self.records.len() == self.max_depth {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn pop(&mut self) -> Option<ModificationRecord> {
        self.records.pop_back()
    }

    pub fn last(&self) -> Option<&ModificationRecord> {
        self.records.back()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
