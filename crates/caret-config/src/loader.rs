// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, applied in order:
//! 1. TOML file (base values; missing keys fall back to defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{CaretConfig, ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "caret_configuration.toml";

/// Find the CARET configuration file
///
/// Search order:
/// 1. `CARET_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to five parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("CARET_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by CARET_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd;
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent.to_path_buf();
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet CARET_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if the config file is not found or contains invalid TOML.
/// Validation is a separate step (`validate_config`).
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<CaretConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: CaretConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `CARET_LOG_LEVEL` -> `logging.level`
/// - `CARET_AUTOLOAD_SORT_ENTRIES` -> `autoload.sort_directory_entries`
/// - `CARET_AUTOLOAD_RECORD_FAILED` -> `autoload.record_failed_attempts`
/// - `CARET_AUTOLOAD_REPLAY` -> `autoload.replay_history_on_restore`
/// - `CARET_UNDO_DEPTH` -> `volume_edit.max_undo_depth`
///
/// Values that do not parse are ignored.
pub fn apply_environment_overrides(config: &mut CaretConfig) {
    if let Ok(value) = env::var("CARET_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Some(flag) = env::var("CARET_AUTOLOAD_SORT_ENTRIES").ok().as_deref().and_then(parse_flag) {
        config.autoload.sort_directory_entries = flag;
    }
    if let Some(flag) = env::var("CARET_AUTOLOAD_RECORD_FAILED").ok().as_deref().and_then(parse_flag) {
        config.autoload.record_failed_attempts = flag;
    }
    if let Some(flag) = env::var("CARET_AUTOLOAD_REPLAY").ok().as_deref().and_then(parse_flag) {
        config.autoload.replay_history_on_restore = flag;
    }
    if let Ok(value) = env::var("CARET_UNDO_DEPTH") {
        if let Ok(depth) = value.parse::<usize>() {
            config.volume_edit.max_undo_depth = depth;
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Map of CLI arguments (e.g. `{"log_level": "debug", "cluster_loaders": "2"}`)
pub fn apply_cli_overrides(config: &mut CaretConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }

    let counts = [
        ("metric_voxel_loaders", &mut config.autoload.metric_voxel_loaders),
        ("metric_node_loaders", &mut config.autoload.metric_node_loaders),
        ("functional_volume_loaders", &mut config.autoload.functional_volume_loaders),
        ("cluster_loaders", &mut config.autoload.cluster_loaders),
        ("max_undo_depth", &mut config.volume_edit.max_undo_depth),
    ];
    for (key, target) in counts {
        if let Some(count) = cli_args.get(key).and_then(|v| v.parse::<usize>().ok()) {
            *target = count;
        }
    }

    if let Some(value) = cli_args.get("volume_extension") {
        config.autoload.volume_extension = value.clone();
    }
    if let Some(value) = cli_args.get("metric_extension") {
        config.autoload.metric_extension = value.clone();
    }
    if let Some(flag) = cli_args.get("sort_directory_entries").and_then(|v| parse_flag(v)) {
        config.autoload.sort_directory_entries = flag;
    }
    if let Some(flag) = cli_args.get("record_failed_attempts").and_then(|v| parse_flag(v)) {
        config.autoload.record_failed_attempts = flag;
    }
    if let Some(radius) = cli_args.get("brush_radius").and_then(|v| v.parse::<u8>().ok()) {
        config.volume_edit.default_brush_radius = radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("CARET_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("CARET_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::set_var("CARET_CONFIG_PATH", "/definitely/not/here/caret.toml");
        let result = find_config_file();
        env::remove_var("CARET_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[autoload]").unwrap();
        writeln!(file, "cluster_loaders = 2").unwrap();
        writeln!(file, "sort_directory_entries = false").unwrap();
        writeln!(file, "[volume_edit]").unwrap();
        writeln!(file, "max_undo_depth = 8").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.autoload.cluster_loaders, 2);
        assert!(!config.autoload.sort_directory_entries);
        assert_eq!(config.autoload.metric_voxel_loaders, 4);
        assert_eq!(config.autoload.volume_extension, ".nii.gz");
        assert_eq!(config.volume_edit.max_undo_depth, 8);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "[autoload\ncluster_loaders = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = CaretConfig::default();

        env::set_var("CARET_LOG_LEVEL", "debug");
        env::set_var("CARET_AUTOLOAD_RECORD_FAILED", "no");
        env::set_var("CARET_UNDO_DEPTH", "not-a-number");

        apply_environment_overrides(&mut config);

        env::remove_var("CARET_LOG_LEVEL");
        env::remove_var("CARET_AUTOLOAD_RECORD_FAILED");
        env::remove_var("CARET_UNDO_DEPTH");

        assert_eq!(config.logging.level, "debug");
        assert!(!config.autoload.record_failed_attempts);
        assert_eq!(config.volume_edit.max_undo_depth, 64);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = CaretConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("metric_voxel_loaders".to_string(), "1".to_string());
        cli_args.insert("brush_radius".to_string(), "3".to_string());
        cli_args.insert("sort_directory_entries".to_string(), "false".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.autoload.metric_voxel_loaders, 1);
        assert_eq!(config.volume_edit.default_brush_radius, 3);
        assert!(!config.autoload.sort_directory_entries);
    }
}
