// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

mod common;

use caret_autoload::{
    AutoLoadError, AutoLoader, ClusterLoader, FunctionalVolumeLoader, InstalledSlot,
    MetricNodeLoader, MetricVoxelLoader, OverlayKind,
};
use caret_config::AutoLoadConfig;
use caret_structures::VoxelIJK;
use common::{touch, Host, RepoCall, ANATOMY, PAINT, SURFACE};
use tempfile::TempDir;

fn metric_voxel_loader(dir: &TempDir) -> MetricVoxelLoader {
    let mut loader = MetricVoxelLoader::new(&AutoLoadConfig::default()).unwrap();
    let state = loader.state_mut();
    state.set_enabled(true);
    state.set_directory(dir.path());
    state.set_anatomy_volume(Some(ANATOMY));
    loader
}

#[test]
fn test_disabled_loader_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["foo_1_2_3.nii.gz"]);
    let mut host = Host::default();
    let mut loader = metric_voxel_loader(&dir);
    loader.state_mut().set_enabled(false);

    assert!(loader.load_for_voxel(VoxelIJK::new(1, 2, 3), &mut host.ctx()).is_ok());
    assert_eq!(loader.state().history_count(), 0);
    assert_eq!(loader.state().last_probe(), None);
    assert_eq!(loader.state().last_installed(), None);
    assert!(host.repo.calls.is_empty());
}

#[test]
fn test_negative_voxel_is_invalid_and_not_recorded() {
    let dir = TempDir::new().unwrap();
    let mut host = Host::default();
    let mut loader = metric_voxel_loader(&dir);

    let err = loader
        .load_for_voxel(VoxelIJK::new(-1, 2, 3), &mut host.ctx())
        .unwrap_err();
    assert_eq!(err, AutoLoadError::BadProbe("invalid voxel".to_string()));
    assert_eq!(loader.state().history_count(), 0);
    assert_eq!(loader.state().last_probe(), None);
}

#[test]
fn test_missing_directory_is_path_invalid() {
    let dir = TempDir::new().unwrap();
    let mut host = Host::default();
    let mut loader = metric_voxel_loader(&dir);
    loader.state_mut().set_directory(dir.path().join("missing"));

    let err = loader
        .load_for_voxel(VoxelIJK::new(1, 2, 3), &mut host.ctx())
        .unwrap_err();
    assert!(matches!(err, AutoLoadError::PathInvalid(_)));
    assert!(err.to_string().contains("missing"));
    assert_eq!(loader.state().history_count(), 0);

    loader.state_mut().set_directory("");
    let err = loader
        .load_for_voxel(VoxelIJK::new(1, 2, 3), &mut host.ctx())
        .unwrap_err();
    assert!(matches!(err, AutoLoadError::PathInvalid(_)));
}

#[test]
fn test_no_match_is_recorded_by_default() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["foo_1_2_3.nii.gz"]);
    let mut host = Host::default();
    let mut loader = metric_voxel_loader(&dir);

    let err = loader
        .load_for_voxel(VoxelIJK::new(0, 0, 0), &mut host.ctx())
        .unwrap_err();
    assert_eq!(err.to_string(), "no file for (0, 0, 0)");
    assert_eq!(loader.state().history(), &[VoxelIJK::new(0, 0, 0)]);
    assert!(host.repo.calls.is_empty());
}

#[test]
fn test_no_match_not_recorded_when_policy_off() {
    let dir = TempDir::new().unwrap();
    let config = AutoLoadConfig {
        record_failed_attempts: false,
        ..AutoLoadConfig::default()
    };
    let mut loader = MetricVoxelLoader::new(&config).unwrap();
    loader.state_mut().set_enabled(true);
    loader.state_mut().set_directory(dir.path());
    let mut host = Host::default();

    assert!(loader.load_for_voxel(VoxelIJK::new(0, 0, 0), &mut host.ctx()).is_err());
    assert_eq!(loader.state().history_count(), 0);
    assert_eq!(loader.state().last_probe(), Some(VoxelIJK::new(0, 0, 0)));
}

#[test]
fn test_match_is_case_insensitive_and_promoted() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["CORR_4_5_6.NII.GZ"]);
    let mut host = Host::default();
    let mut loader = metric_voxel_loader(&dir);
    loader.state_mut().set_display_surface(Some(SURFACE));

    loader
        .load_for_voxel(VoxelIJK::new(4, 5, 6), &mut host.ctx())
        .unwrap();

    assert_eq!(
        host.repo.calls,
        vec![RepoCall::ReadMetric(dir.path().join("CORR_4_5_6.NII.GZ"))]
    );
    assert_eq!(host.coloring.promotions.len(), 1);
    let promotion = host.coloring.promotions[0];
    assert_eq!(promotion.kind, OverlayKind::Metric);
    assert_eq!(promotion.display_surface, Some(SURFACE));
    assert_eq!(Some(promotion.slot), loader.state().last_installed());
}

#[test]
fn test_sorted_entries_make_first_match_stable() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["b_1_1_1.nii.gz", "a_1_1_1.nii.gz", "c_1_1_1.nii.gz"]);

    let mut picked = Vec::new();
    for _ in 0..3 {
        let mut host = Host::default();
        let mut loader = metric_voxel_loader(&dir);
        loader
            .load_for_voxel(VoxelIJK::new(1, 1, 1), &mut host.ctx())
            .unwrap();
        picked.push(host.repo.calls[0].clone());
    }
    assert_eq!(picked[0], RepoCall::ReadMetric(dir.path().join("a_1_1_1.nii.gz")));
    assert!(picked.iter().all(|call| *call == picked[0]));
}

#[test]
fn test_names_with_extra_keys_are_skipped() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["foo_1_10_20_30.nii.gz", "foo_20_30.nii.gz"]);
    let mut host = Host::default();
    let mut loader = metric_voxel_loader(&dir);

    let err = loader
        .load_for_voxel(VoxelIJK::new(10, 20, 30), &mut host.ctx())
        .unwrap_err();
    assert!(matches!(err, AutoLoadError::NoMatch(_)));
    assert!(host.repo.calls.is_empty());

    touch(dir.path(), &["foo_10_20_30.nii.gz"]);
    loader
        .load_for_voxel(VoxelIJK::new(10, 20, 30), &mut host.ctx())
        .unwrap();
    assert_eq!(
        host.repo.calls,
        vec![RepoCall::ReadMetric(dir.path().join("foo_10_20_30.nii.gz"))]
    );
}

#[test]
fn test_failure_without_replace_keeps_slot() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["x_1_1_1.nii.gz"]);
    let mut host = Host::default();
    let mut loader = metric_voxel_loader(&dir);

    loader.load_for_voxel(VoxelIJK::new(1, 1, 1), &mut host.ctx()).unwrap();
    let first = loader.state().last_installed();
    assert!(loader.load_for_voxel(VoxelIJK::new(2, 2, 2), &mut host.ctx()).is_err());

    assert_eq!(loader.state().last_installed(), first);
    assert!(host.repo.deletes().is_empty());
}

#[test]
fn test_failure_with_replace_empties_slot() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["x_1_1_1.nii.gz"]);
    let mut host = Host::default();
    let mut loader = metric_voxel_loader(&dir);
    loader.state_mut().set_replace_last(true);

    loader.load_for_voxel(VoxelIJK::new(1, 1, 1), &mut host.ctx()).unwrap();
    assert!(loader.load_for_voxel(VoxelIJK::new(2, 2, 2), &mut host.ctx()).is_err());

    assert_eq!(host.repo.deletes(), vec![InstalledSlot::new(1)]);
    assert_eq!(loader.state().last_installed(), None);
}

#[test]
fn test_functional_volume_loader_reads_volumes() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["fmri_7_8_9.nii.gz"]);
    let mut host = Host::default();
    let mut loader = FunctionalVolumeLoader::new(&AutoLoadConfig::default()).unwrap();
    loader.state_mut().set_enabled(true);
    loader.state_mut().set_directory(dir.path());

    loader.load_for_voxel(VoxelIJK::new(7, 8, 9), &mut host.ctx()).unwrap();

    assert_eq!(
        host.repo.calls,
        vec![RepoCall::ReadVolume(dir.path().join("fmri_7_8_9.nii.gz"))]
    );
    assert_eq!(host.coloring.promotions[0].kind, OverlayKind::FunctionalVolume);
}

#[test]
fn test_voxel_loader_rejects_direct_node_probe() {
    let dir = TempDir::new().unwrap();
    let mut host = Host::default();
    let mut loader = metric_voxel_loader(&dir);
    assert!(!loader.is_node_load_supported());
    assert_eq!(
        loader.load_for_node(3, &mut host.ctx()),
        Err(AutoLoadError::NotSupported)
    );
}

#[test]
fn test_metric_node_loader() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["corr_5.metric", "corr_55.metric", "corr_5.nii.gz"]);
    let mut host = Host::default();
    let mut loader = MetricNodeLoader::new(&AutoLoadConfig::default()).unwrap();
    loader.state_mut().set_enabled(true);
    loader.state_mut().set_directory(dir.path());

    assert!(loader.is_node_load_supported());
    loader.load_for_node(5, &mut host.ctx()).unwrap();
    assert_eq!(
        host.repo.calls,
        vec![RepoCall::ReadMetric(dir.path().join("corr_5.metric"))]
    );
    assert_eq!(loader.state().history(), &[5]);

    let err = loader.load_for_node(6, &mut host.ctx()).unwrap_err();
    assert_eq!(err.to_string(), "no file for node 6");

    let err = loader.load_for_node(800, &mut host.ctx()).unwrap_err();
    assert!(matches!(err, AutoLoadError::BadProbe(_)));
    assert_eq!(loader.state().history(), &[5, 6]);

    assert_eq!(
        loader.load_for_voxel(VoxelIJK::new(0, 0, 0), &mut host.ctx()),
        Err(AutoLoadError::NotSupported)
    );
}

fn cluster_loader(metric_dir: &TempDir, volume_dir: &TempDir) -> ClusterLoader {
    let mut loader = ClusterLoader::new(&AutoLoadConfig::default());
    loader.set_paint_column(Some(PAINT));
    let state = loader.state_mut();
    state.set_enabled(true);
    state.set_display_surface(Some(SURFACE));
    state.set_directory(metric_dir.path());
    state.set_secondary_directory(volume_dir.path());
    loader
}

#[test]
fn test_cluster_loads_both_artifacts_and_highlights_members() {
    let metric_dir = TempDir::new().unwrap();
    let volume_dir = TempDir::new().unwrap();
    touch(metric_dir.path(), &["cluster_2.metric"]);
    touch(volume_dir.path(), &["cluster_2.nii.gz"]);
    let mut host = Host::default();
    let mut loader = cluster_loader(&metric_dir, &volume_dir);

    // Node 1 carries paint label 2, as do nodes 2, 5 and 7.
    loader.load_for_node(1, &mut host.ctx()).unwrap();

    assert_eq!(
        host.repo.calls,
        vec![
            RepoCall::ReadMetric(metric_dir.path().join("cluster_2.metric")),
            RepoCall::ReadVolume(volume_dir.path().join("cluster_2.nii.gz")),
        ]
    );
    assert_eq!(host.coloring.highlights, vec![vec![2, 5, 7]]);
    assert_eq!(loader.last_metric_slot(), Some(InstalledSlot::new(1)));
    assert_eq!(loader.last_volume_slot(), Some(InstalledSlot::new(2)));
    assert_eq!(loader.state().history(), &[1]);
}

#[test]
fn test_cluster_highlight_cleared_by_next_probe() {
    let metric_dir = TempDir::new().unwrap();
    let volume_dir = TempDir::new().unwrap();
    touch(metric_dir.path(), &["cluster_2.metric"]);
    let mut host = Host::default();
    let mut loader = cluster_loader(&metric_dir, &volume_dir);

    loader.load_for_node(1, &mut host.ctx()).unwrap();
    assert_eq!(host.coloring.highlighted, vec![2, 5, 7]);

    // Node 3 has no paint label, so nothing new is highlighted.
    let err = loader.load_for_node(3, &mut host.ctx()).unwrap_err();
    assert!(matches!(err, AutoLoadError::BadProbe(_)));
    assert!(host.coloring.highlighted.is_empty());
    assert_eq!(host.coloring.clears, 2);

    // Out-of-range nodes are rejected before touching the coloring.
    let _ = loader.load_for_node(99, &mut host.ctx());
    assert_eq!(host.coloring.clears, 2);
}

#[test]
fn test_cluster_partial_load_and_replacement() {
    let metric_dir = TempDir::new().unwrap();
    let volume_dir = TempDir::new().unwrap();
    touch(metric_dir.path(), &["cluster_2.metric", "cluster_7.metric"]);
    let mut host = Host::default();
    let mut loader = cluster_loader(&metric_dir, &volume_dir);
    loader.state_mut().set_replace_last(true);

    let err = loader.load_for_node(1, &mut host.ctx()).unwrap_err();
    assert!(matches!(err, AutoLoadError::ReadFailed(_)));
    assert_eq!(loader.last_metric_slot(), Some(InstalledSlot::new(1)));
    assert_eq!(loader.last_volume_slot(), None);

    let _ = loader.load_for_node(4, &mut host.ctx());
    assert_eq!(host.repo.deletes(), vec![InstalledSlot::new(1)]);
    assert_eq!(loader.last_metric_slot(), Some(InstalledSlot::new(2)));
    assert_eq!(loader.state().history(), &[1, 4]);
}

#[test]
fn test_cluster_prerequisites() {
    let metric_dir = TempDir::new().unwrap();
    let volume_dir = TempDir::new().unwrap();
    let mut host = Host::default();

    let mut loader = cluster_loader(&metric_dir, &volume_dir);
    loader.state_mut().set_display_surface(None);
    assert!(matches!(
        loader.load_for_node(1, &mut host.ctx()),
        Err(AutoLoadError::ConfigMissing(_))
    ));

    let mut loader = cluster_loader(&metric_dir, &volume_dir);
    loader.set_paint_column(None);
    assert!(matches!(
        loader.load_for_node(1, &mut host.ctx()),
        Err(AutoLoadError::ConfigMissing(_))
    ));

    let mut loader = cluster_loader(&metric_dir, &volume_dir);
    loader.state_mut().set_directory("");
    loader.state_mut().set_secondary_directory("");
    assert_eq!(
        loader.load_for_node(1, &mut host.ctx()).unwrap_err().to_string(),
        "Both metric and functional volume directory names are empty"
    );

    // Node 3 has paint label -1.
    let mut loader = cluster_loader(&metric_dir, &volume_dir);
    let err = loader.load_for_node(3, &mut host.ctx()).unwrap_err();
    assert_eq!(err.to_string(), "no cluster for node 3 with invalid paint index");
    assert_eq!(loader.state().history_count(), 0);
    assert!(host.repo.calls.is_empty());
}

#[test]
fn test_cluster_bad_directory_does_not_block_other_artifact() {
    let metric_dir = TempDir::new().unwrap();
    let volume_dir = TempDir::new().unwrap();
    touch(volume_dir.path(), &["cluster_7.nii.gz"]);
    let mut host = Host::default();
    let mut loader = cluster_loader(&metric_dir, &volume_dir);
    loader.state_mut().set_directory(metric_dir.path().join("nope"));

    let err = loader.load_for_node(4, &mut host.ctx()).unwrap_err();
    assert!(matches!(err, AutoLoadError::PathInvalid(_)));
    assert!(err.to_string().starts_with("metric directory"));
    assert_eq!(loader.last_volume_slot(), Some(InstalledSlot::new(1)));
}

#[test]
fn test_update_clears_stale_handles() {
    let metric_dir = TempDir::new().unwrap();
    let volume_dir = TempDir::new().unwrap();
    let mut host = Host::default();
    let mut loader = cluster_loader(&metric_dir, &volume_dir);
    loader.state_mut().set_anatomy_volume(Some(ANATOMY));

    host.brain.surfaces.clear();
    host.brain.paint_columns.clear();
    loader.update(&host.brain);

    assert_eq!(loader.state().display_surface(), None);
    assert_eq!(loader.paint_column(), None);
    assert_eq!(loader.state().anatomy_volume(), Some(ANATOMY));
}
