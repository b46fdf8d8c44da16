// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

use caret_structures::{VolumeAxis, VolumeDimensions, VoxelIJK};

/// Result type for brush operations
pub type BrushResult<T> = Result<T, BrushError>;

/// Errors raised by the brush engine and the paint editor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrushError {
    #[error("oblique not allowed: editing of {0} slices is not supported")]
    AxisUnsupported(VolumeAxis),

    #[error("slice axis is ALL but no X, Y or Z face was picked")]
    AmbiguousAxis,

    #[error("no paint volume attached to the editor")]
    NoGridAttached,

    #[error("voxel {voxel} is outside the volume ({dims})")]
    OutOfBounds {
        voxel: VoxelIJK,
        dims: VolumeDimensions,
    },

    #[error("brush radius {0} is outside 0-5")]
    InvalidBrushSize(u8),

    #[error("paint name is empty")]
    MissingPaintName,

    #[error("paint editor is not open")]
    NotEditing,
}
