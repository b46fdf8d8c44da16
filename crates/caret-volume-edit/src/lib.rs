// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

/*!
# CARET Paint Volume Editor

Reversible brush editing of a labeled voxel grid:

- [`VoxelBrushEngine`]: square (2r+1) x (2r+1) x 1 brush laid on the active slice
- [`ModificationRecord`] / [`UndoStack`]: voxel/old-label pairs, popped LIFO to undo
- [`PaintEditor`]: `Idle`/`Editing` state machine driven by the editor dialog
- [`VolumeGrid`] / [`LabelVolume`]: the grid being painted and its paint-name table
- [`NameLookup`] / [`AreaColorTable`]: makes sure every painted name has a color

## Stroke

```text
click (i,j,k) ─► resolve slice axis ─► brush cuboid (clipped) ─► relabel voxels
                   (ALL uses picked face,                         │
                    oblique rejected)                             ▼
                                                   ModificationRecord ─► UndoStack
```
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod brush;
pub mod editor;
pub mod error;
pub mod grid;
pub mod modification;
pub mod names;

pub use brush::{VoxelBrushEngine, MAX_BRUSH_RADIUS};
pub use editor::{EditorState, PaintEditor};
pub use error::{BrushError, BrushResult};
pub use grid::{Label, LabelVolume, VolumeGrid, UNASSIGNED_PAINT_NAME};
pub use modification::{ModificationRecord, UndoStack};
pub use names::{AreaColorTable, NameLookup, Rgb};
