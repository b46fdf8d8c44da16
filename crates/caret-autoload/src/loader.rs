// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! The loader contract and the directory-scan load shared by the
//! voxel-keyed and node-keyed metric loaders.

use std::path::Path;

use caret_structures::{NodeIndex, SurfaceHandle, VoxelIJK};
use tracing::debug;

use crate::context::{
    AutoLoadContext, BrainDataSet, FileRepository, InstalledSlot, OverlayKind, OverlayPromotion,
};
use crate::error::{AutoLoadError, AutoLoadResult, RepositoryError};
use crate::pattern::FileNamePattern;
use crate::scene::SceneInfo;
use crate::state::{AutoLoaderState, LoadPolicy, ProbeKey};

/// A controller that installs data files in response to probes
pub trait AutoLoader {
    type Probe: ProbeKey;

    fn state(&self) -> &AutoLoaderState<Self::Probe>;

    fn state_mut(&mut self) -> &mut AutoLoaderState<Self::Probe>;

    fn load_for_voxel(
        &mut self,
        _voxel: VoxelIJK,
        _ctx: &mut AutoLoadContext<'_>,
    ) -> AutoLoadResult<()> {
        Err(AutoLoadError::NotSupported)
    }

    fn load_for_node(
        &mut self,
        _node: NodeIndex,
        _ctx: &mut AutoLoadContext<'_>,
    ) -> AutoLoadResult<()> {
        Err(AutoLoadError::NotSupported)
    }

    fn is_node_load_supported(&self) -> bool {
        false
    }

    /// Run a probe of this loader's own key type (used to replay history)
    fn load_probe(
        &mut self,
        probe: Self::Probe,
        ctx: &mut AutoLoadContext<'_>,
    ) -> AutoLoadResult<()>;

    fn is_enabled(&self) -> bool {
        self.state().enabled()
    }

    fn reset(&mut self) {
        self.state_mut().reset();
    }

    fn update(&mut self, data: &dyn BrainDataSet) {
        self.state_mut().update(data);
    }

    /// Scene infos beyond the common set
    fn extra_scene_infos(&self, _data: &dyn BrainDataSet) -> Vec<SceneInfo> {
        Vec::new()
    }

    /// Apply a scene info the common set does not know; false if unknown here too
    fn apply_extra_scene_info(
        &mut self,
        _info: &SceneInfo,
        _data: &dyn BrainDataSet,
    ) -> bool {
        false
    }
}

pub(crate) fn read_artifact(
    files: &mut dyn FileRepository,
    kind: OverlayKind,
    path: &Path,
) -> Result<InstalledSlot, RepositoryError> {
    match kind {
        OverlayKind::Metric => files.read_metric_column(path),
        OverlayKind::FunctionalVolume => files.read_functional_volume(path),
    }
}

pub(crate) fn promote(
    ctx: &mut AutoLoadContext<'_>,
    policy: &LoadPolicy,
    kind: OverlayKind,
    slot: InstalledSlot,
    display_surface: Option<SurfaceHandle>,
) {
    if policy.promote_overlays {
        ctx.coloring.promote_overlay(OverlayPromotion {
            kind,
            slot,
            display_surface,
        });
    }
}

/// Delete the previous install if replacing, find the file named for
/// `probe` in the loader's directory and read it
///
/// The probe is recorded on success, and on a miss or read failure when the
/// policy records failed attempts.
pub(crate) fn load_matching_file<P: ProbeKey>(
    state: &mut AutoLoaderState<P>,
    policy: &LoadPolicy,
    pattern: &FileNamePattern,
    kind: OverlayKind,
    probe: P,
    ctx: &mut AutoLoadContext<'_>,
) -> AutoLoadResult<()> {
    state.set_last_probe(Some(probe));
    state.release_last(ctx.files);

    match find_and_read(state.directory(), policy, pattern, kind, probe, ctx.files) {
        Ok(slot) => {
            debug!("[AUTOLOAD] Installed {} for {}", slot, probe.describe());
            state.install(slot);
            state.push_history(probe);
            promote(ctx, policy, kind, slot, state.display_surface());
            Ok(())
        }
        Err(err) => {
            if err.reached_filesystem() && policy.record_failed_attempts {
                state.push_history(probe);
            }
            Err(err)
        }
    }
}

fn find_and_read<P: ProbeKey>(
    directory: &Path,
    policy: &LoadPolicy,
    pattern: &FileNamePattern,
    kind: OverlayKind,
    probe: P,
    files: &mut dyn FileRepository,
) -> AutoLoadResult<InstalledSlot> {
    let invalid =
        || AutoLoadError::PathInvalid(format!("directory \"{}\" invalid", directory.display()));
    if directory.as_os_str().is_empty() {
        return Err(invalid());
    }
    let mut entries = files.list_directory(directory).map_err(|_| invalid())?;
    if policy.sort_directory_entries {
        entries.sort();
    }

    let name = pattern
        .find_first(&entries, &probe.file_key())
        .ok_or_else(|| AutoLoadError::NoMatch(format!("no file for {}", probe.describe())))?;

    let path = directory.join(name);
    read_artifact(files, kind, &path).map_err(|e| AutoLoadError::ReadFailed(e.message))
}
