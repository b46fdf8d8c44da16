// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

/*!
# CARET Auto-Loaders

Probe-driven loading of data files from disk archives. Each time the user
picks a voxel or a surface node, every enabled loader looks for the file named
after that probe, asks the host to read it and remembers what it installed.

## Families

| Family | Keyed by | File | Installs |
|--------|----------|------|----------|
| [`MetricNodeLoader`] | node | `*_<n><metric-ext>` | metric column |
| [`MetricVoxelLoader`] | anatomy voxel | `*_<i>_<j>_<k><volume-ext>` | metric column |
| [`FunctionalVolumeLoader`] | anatomy voxel | `*_<i>_<j>_<k><volume-ext>` | functional volume |
| [`ClusterLoader`] | node paint label | `cluster_<L><ext>` | metric column and/or volume |

## Flow

```text
Pick ─► ProbeDispatcher ─► AutoLoaderManager ─► loader 1..K per family
                                    │                 │
                                    ▼                 ▼
                             DispatchReport    FileRepository / ColoringState
```

The host supplies its data, file reader and display state through
[`AutoLoadContext`]; nothing here is global.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cluster;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod loader;
pub mod manager;
pub mod metric_node;
pub mod pattern;
pub mod scene;
pub mod state;
pub mod voxel_keyed;

pub use cluster::ClusterLoader;
pub use context::{
    AutoLoadContext, BrainDataSet, ColoringState, FileRepository, InstalledSlot, OverlayKind,
    OverlayPromotion,
};
pub use dispatcher::{Pick, ProbeDispatcher};
pub use error::{AutoLoadError, AutoLoadResult, DispatchReport, LoaderFailure, RepositoryError};
pub use loader::AutoLoader;
pub use manager::{AutoLoaderManager, LoaderFamily, LoaderId};
pub use metric_node::MetricNodeLoader;
pub use pattern::FileNamePattern;
pub use scene::{Scene, SceneClass, SceneInfo};
pub use state::{AutoLoaderState, LoadPolicy, ProbeKey};
pub use voxel_keyed::{FunctionalVolumeLoader, MetricVoxelLoader, VoxelKeyedLoader};
