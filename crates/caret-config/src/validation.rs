//! Configuration validation
//!
//! Checks that loader family sizes, file extensions and editor limits are
//! usable before the manager and the editor are built from them.

use crate::{CaretConfig, ConfigError, ConfigResult};

/// Largest number of loaders a single family may have
pub const MAX_LOADERS_PER_FAMILY: usize = 16;

/// Largest brush radius (11 x 11 brush)
pub const MAX_BRUSH_RADIUS: u8 = 5;

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidFamilySize { family: String, size: usize },
    InvalidExtension { field: String, value: String },
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFamilySize { family, size } => write!(
                f,
                "autoload.{} = {} is outside valid range (1-{})",
                family, size, MAX_LOADERS_PER_FAMILY
            ),
            Self::InvalidExtension { field, value } => write!(
                f,
                "{} = '{}' must start with '.' and name an extension",
                field, value
            ),
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &CaretConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_family_sizes(config, &mut errors);
    validate_extensions(config, &mut errors);
    validate_volume_edit(config, &mut errors);

    if config.logging.level.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "logging.level".to_string(),
        });
    }

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_family_sizes(config: &CaretConfig, errors: &mut Vec<ConfigValidationError>) {
    for (family, size) in config.autoload.family_sizes() {
        if size == 0 || size > MAX_LOADERS_PER_FAMILY {
            errors.push(ConfigValidationError::InvalidFamilySize {
                family: family.to_string(),
                size,
            });
        }
    }
}

fn validate_extensions(config: &CaretConfig, errors: &mut Vec<ConfigValidationError>) {
    let extensions = [
        ("autoload.volume_extension", &config.autoload.volume_extension),
        ("autoload.metric_extension", &config.autoload.metric_extension),
    ];
    for (field, value) in extensions {
        if value.len() < 2 || !value.starts_with('.') {
            errors.push(ConfigValidationError::InvalidExtension {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    if config.autoload.cluster_file_prefix.contains(['/', '\\']) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "autoload.cluster_file_prefix".to_string(),
            reason: "must not contain path separators".to_string(),
        });
    }
}

fn validate_volume_edit(config: &CaretConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.volume_edit.max_undo_depth == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "volume_edit.max_undo_depth".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    if config.volume_edit.default_brush_radius > MAX_BRUSH_RADIUS {
        errors.push(ConfigValidationError::InvalidValue {
            field: "volume_edit.default_brush_radius".to_string(),
            reason: format!(
                "{} exceeds the largest brush radius {}",
                config.volume_edit.default_brush_radius, MAX_BRUSH_RADIUS
            ),
        });
    }
}
