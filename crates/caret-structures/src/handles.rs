//! Host-owned data handles.
//!
//! Loaders never own volumes, surfaces or paint columns. They keep one of
//! these handles and ask the host to resolve it on every use, so a handle can
//! go stale when the host unloads the data; `update()` on a loader clears
//! handles that no longer resolve.

use crate::define_handle;

/// World-space coordinate (x, y, z) in millimetres.
pub type Xyz = [f32; 3];

/// Index of a node on a surface.
pub type NodeIndex = usize;

define_handle!(
    VolumeHandle,
    u32,
    "volume",
    "Handle to a volume (anatomy or functional) loaded in the host."
);

define_handle!(
    SurfaceHandle,
    u32,
    "surface",
    "Handle to a surface whose coordinate file maps nodes to world positions."
);

define_handle!(
    PaintColumnHandle,
    u32,
    "paint-column",
    "Handle to a column of the host's paint file (one label per node)."
);
