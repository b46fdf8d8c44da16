use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CaretDataError;

/// Integer indices (i, j, k) of one cell in a voxel grid.
///
/// Components are signed so that brush bounds and the "invalid voxel"
/// sentinel can be expressed; any negative component makes the voxel invalid
/// and it must never be used to address a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelIJK {
    pub i: i32,
    pub j: i32,
    pub k: i32,
}

impl VoxelIJK {
    /// Sentinel for "no voxel".
    pub const INVALID: VoxelIJK = VoxelIJK { i: -1, j: -1, k: -1 };

    pub const fn new(i: i32, j: i32, k: i32) -> Self {
        VoxelIJK { i, j, k }
    }

    pub const fn from_array(ijk: [i32; 3]) -> Self {
        VoxelIJK {
            i: ijk[0],
            j: ijk[1],
            k: ijk[2],
        }
    }

    pub const fn as_array(&self) -> [i32; 3] {
        [self.i, self.j, self.k]
    }

    /// True when no component is negative.
    pub const fn is_valid(&self) -> bool {
        self.i >= 0 && self.j >= 0 && self.k >= 0
    }

    /// Component along axis 0 (i), 1 (j) or 2 (k).
    pub fn component(&self, axis: usize) -> i32 {
        self.as_array()[axis]
    }

    /// Convert to unsigned grid indices if the voxel lies inside `dims`.
    pub fn to_grid_index(&self, dims: &VolumeDimensions) -> Option<[usize; 3]> {
        if dims.contains(self) {
            Some([self.i as usize, self.j as usize, self.k as usize])
        } else {
            None
        }
    }

    /// Space separated form used in scene records, e.g. `"10 20 30"`.
    pub fn to_scene_string(&self) -> String {
        format!("{} {} {}", self.i, self.j, self.k)
    }
}

impl Default for VoxelIJK {
    fn default() -> Self {
        VoxelIJK::INVALID
    }
}

impl Display for VoxelIJK {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

impl From<[i32; 3]> for VoxelIJK {
    fn from(ijk: [i32; 3]) -> Self {
        VoxelIJK::from_array(ijk)
    }
}

impl FromStr for VoxelIJK {
    type Err = CaretDataError;

    /// Parses three integers separated by whitespace and/or commas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 {
            return Err(CaretDataError::ParseError(format!(
                "expected three voxel indices, got '{}'",
                s
            )));
        }
        let mut ijk = [0i32; 3];
        for (slot, part) in ijk.iter_mut().zip(parts) {
            *slot = part.parse::<i32>().map_err(|e| {
                CaretDataError::ParseError(format!("voxel index '{}': {}", part, e))
            })?;
        }
        Ok(VoxelIJK::from_array(ijk))
    }
}

/// Extent of a voxel grid along i, j and k.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VolumeDimensions {
    x: usize,
    y: usize,
    z: usize,
}

impl VolumeDimensions {
    /// Create dimensions; every axis must be non-zero.
    pub fn new(x: usize, y: usize, z: usize) -> Result<Self, CaretDataError> {
        if x == 0 || y == 0 || z == 0 {
            return Err(CaretDataError::BadParameters(format!(
                "volume dimensions must be non-zero, got ({}, {}, {})",
                x, y, z
            )));
        }
        Ok(VolumeDimensions { x, y, z })
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn z(&self) -> usize {
        self.z
    }

    pub fn as_array(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    pub fn total_voxels(&self) -> usize {
        self.x * self.y * self.z
    }

    /// True when `voxel` addresses a cell inside these dimensions.
    pub fn contains(&self, voxel: &VoxelIJK) -> bool {
        voxel.is_valid()
            && (voxel.i as usize) < self.x
            && (voxel.j as usize) < self.y
            && (voxel.k as usize) < self.z
    }
}

impl Display for VolumeDimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}
