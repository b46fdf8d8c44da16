// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! The core crate for CARET. Defines the data types shared by the auto-loader
//! and the paint-volume editor:
//!
//! - [`VoxelIJK`]: integer voxel indices, with an invalid sentinel
//! - [`VolumeDimensions`]: extent of a voxel grid
//! - [`VolumeAxis`]: slice axis of a volume view
//! - handles ([`VolumeHandle`], [`SurfaceHandle`], [`PaintColumnHandle`]) naming
//!   host-owned data without borrowing it

pub mod common_macros;
mod error;
pub mod handles;
pub mod voxel;
pub mod axis;

pub use axis::VolumeAxis;
pub use error::CaretDataError;
pub use handles::{NodeIndex, PaintColumnHandle, SurfaceHandle, VolumeHandle, Xyz};
pub use voxel::{VolumeDimensions, VoxelIJK};
