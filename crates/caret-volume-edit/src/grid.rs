// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Labeled voxel grids.

use ahash::AHashMap;
use caret_structures::{CaretDataError, VolumeDimensions, VoxelIJK};
use ndarray::Array3;

/// Paint label stored in a voxel (index into the volume's paint names)
pub type Label = u32;

/// Name of label 0 in a freshly created paint volume
pub const UNASSIGNED_PAINT_NAME: &str = "???";

/// A 3-D grid of paint labels
pub trait VolumeGrid {
    fn dimensions(&self) -> VolumeDimensions;

    /// Label at `voxel`, or `None` outside the grid
    fn label_at(&self, voxel: VoxelIJK) -> Option<Label>;

    /// Write `label` at `voxel`, returning the label it replaced
    ///
    /// Returns `None` and writes nothing outside the grid.
    fn set_label(&mut self, voxel: VoxelIJK, label: Label) -> Option<Label>;

    /// Label for a paint name, adding the name when the volume does not know it yet
    fn label_for_name(&mut self, name: &str) -> Label;

    /// Paint name of a label
    fn label_name(&self, label: Label) -> Option<&str>;
}

/// In-memory paint volume
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVolume {
    labels: Array3<Label>,
    dims: VolumeDimensions,
    names: Vec<String>,
    name_index: AHashMap<String, Label>,
}

impl LabelVolume {
    /// Grid of the given size with every voxel unassigned (label 0)
    pub fn new(dims: VolumeDimensions) -> Self {
        let [x, y, z] = dims.as_array();
        let mut volume = LabelVolume {
            labels: Array3::from_elem((x, y, z), 0),
            dims,
            names: Vec::new(),
            name_index: AHashMap::new(),
        };
        volume.label_for_name(UNASSIGNED_PAINT_NAME);
        volume
    }

    /// Wrap existing label data
    ///
    /// Every label present in `labels` gets a placeholder name so that
    /// `label_name` never fails for stored data.
    pub fn from_labels(labels: Array3<Label>) -> Result<Self, CaretDataError> {
        let (x, y, z) = labels.dim();
        let dims = VolumeDimensions::new(x, y, z)?;
        let mut volume = LabelVolume {
            labels,
            dims,
            names: Vec::new(),
            name_index: AHashMap::new(),
        };
        volume.label_for_name(UNASSIGNED_PAINT_NAME);
        let highest = volume.labels.iter().copied().max().unwrap_or(0);
        for label in 1..=highest {
            volume.label_for_name(&format!("label_{}", label));
        }
        Ok(volume)
    }

    pub fn labels(&self) -> &Array3<Label> {
        &self.labels
    }

    /// Number of voxels carrying `label`
    pub fn count_label(&self, label: Label) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }

    pub fn paint_names(&self) -> &[String] {
        &self.names
    }
}

impl VolumeGrid for LabelVolume {
    fn dimensions(&self) -> VolumeDimensions {
        self.dims
    }

    fn label_at(&self, voxel: VoxelIJK) -> Option<Label> {
        let [i, j, k] = voxel.to_grid_index(&self.dims)?;
        Some(self.labels[[i, j, k]])
    }

    fn set_label(&mut self, voxel: VoxelIJK, label: Label) -> Option<Label> {
        let [i, j, k] = voxel.to_grid_index(&self.dims)?;
        Some(std::mem::replace(&mut self.labels[[i, j, k]], label))
    }

    fn label_for_name(&mut self, name: &str) -> Label {
        if let Some(&label) = self.name_index.get(name) {
            return label;
        }
        let label = self.names.len() as Label;
        self.names.push(name.to_string());
        self.name_index.insert(name.to_string(), label);
        label
    }

    fn label_name(&self, label: Label) -> Option<&str> {
        self.names.get(label as usize).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(x: usize, y: usize, z: usize) -> VolumeDimensions {
        VolumeDimensions::new(x, y, z).unwrap()
    }

    #[test]
    fn test_new_volume_is_unassigned() {
        let volume = LabelVolume::new(dims(3, 4, 5));
        assert_eq!(volume.count_label(0), 60);
        assert_eq!(volume.label_name(0), Some(UNASSIGNED_PAINT_NAME));
    }

    #[test]
    fn test_set_label_returns_previous() {
        let mut volume = LabelVolume::new(dims(3, 3, 3));
        let v = VoxelIJK::new(1, 2, 0);
        assert_eq!(volume.set_label(v, 4), Some(0));
        assert_eq!(volume.set_label(v, 7), Some(4));
        assert_eq!(volume.label_at(v), Some(7));
        assert_eq!(volume.set_label(VoxelIJK::new(3, 0, 0), 1), None);
        assert_eq!(volume.label_at(VoxelIJK::INVALID), None);
    }

    #[test]
    fn test_names_are_stable() {
        let mut volume = LabelVolume::new(dims(2, 2, 2));
        let v1 = volume.label_for_name("V1");
        let mt = volume.label_for_name("MT");
        assert_eq!(volume.label_for_name("V1"), v1);
        assert_ne!(v1, mt);
        assert_eq!(volume.label_name(mt), Some("MT"));
    }

    #[test]
    fn test_from_labels_names_existing_labels() {
        let mut labels = Array3::from_elem((2, 2, 2), 0);
        labels[[1, 1, 1]] = 3;
        let volume = LabelVolume::from_labels(labels).unwrap();
        assert_eq!(volume.label_name(3), Some("label_3"));
        assert_eq!(volume.label_at(VoxelIJK::new(1, 1, 1)), Some(3));
    }
}
