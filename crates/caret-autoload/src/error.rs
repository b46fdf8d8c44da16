// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Loader errors and the per-dispatch report.

use std::fmt::{Display, Formatter};

use crate::manager::LoaderId;

/// Result type for loader operations
pub type AutoLoadResult<T> = Result<T, AutoLoadError>;

/// Why a loader could not install data for a probe
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutoLoadError {
    /// A prerequisite selection (anatomy volume, surface, paint column) is missing
    #[error("{0}")]
    ConfigMissing(String),

    /// Directory is empty, missing or unreadable
    #[error("{0}")]
    PathInvalid(String),

    /// No file in the directory matches the probe
    #[error("{0}")]
    NoMatch(String),

    /// The file repository failed to read the matched file; message is passed through
    #[error("{0}")]
    ReadFailed(String),

    /// Negative voxel component, node out of range, or unusable paint label
    #[error("{0}")]
    BadProbe(String),

    /// The loader does not handle this kind of probe
    #[error("not supported by this loader")]
    NotSupported,

    /// File name pattern could not be built
    #[error("invalid file name pattern: {0}")]
    Pattern(String),

    /// More than one artifact failed in the same probe
    #[error("{}", join_errors(.0))]
    Several(Vec<AutoLoadError>),
}

fn join_errors(errors: &[AutoLoadError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AutoLoadError {
    /// True when the probe reached the filesystem before failing
    pub fn reached_filesystem(&self) -> bool {
        match self {
            AutoLoadError::NoMatch(_) | AutoLoadError::ReadFailed(_) => true,
            AutoLoadError::Several(errors) => errors.iter().any(Self::reached_filesystem),
            _ => false,
        }
    }

    /// Fold a list of failures into one error, if any
    pub fn collect(mut errors: Vec<AutoLoadError>) -> AutoLoadResult<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(AutoLoadError::Several(errors)),
        }
    }
}

impl From<regex::Error> for AutoLoadError {
    fn from(err: regex::Error) -> Self {
        AutoLoadError::Pattern(err.to_string())
    }
}

/// Error returned by a [`FileRepository`](crate::FileRepository) read
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RepositoryError {
    pub message: String,
}

impl RepositoryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::new(err.to_string())
    }
}

/// One loader's failure within a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderFailure {
    pub loader: LoaderId,
    pub error: AutoLoadError,
}

impl Display for LoaderFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.loader, self.error)
    }
}

/// Failures collected while walking the loaders for one probe
///
/// Renders as one line per failure, in dispatch order; an empty report renders
/// as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    failures: Vec<LoaderFailure>,
}

impl DispatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, loader: LoaderId, error: AutoLoadError) {
        self.failures.push(LoaderFailure { loader, error });
    }

    /// Record the outcome of one loader call
    pub fn record(&mut self, loader: LoaderId, result: AutoLoadResult<()>) {
        if let Err(error) = result {
            self.push(loader, error);
        }
    }

    pub fn extend(&mut self, other: DispatchReport) {
        self.failures.extend(other.failures);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[LoaderFailure] {
        &self.failures
    }

    pub fn failures_for(&self, loader: LoaderId) -> impl Iterator<Item = &AutoLoadError> {
        self.failures
            .iter()
            .filter(move |f| f.loader == loader)
            .map(|f| &f.error)
    }
}

impl Display for DispatchReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::LoaderFamily;

    #[test]
    fn test_report_renders_one_line_per_failure() {
        let mut report = DispatchReport::new();
        assert_eq!(report.to_string(), "");

        report.push(
            LoaderId::new(LoaderFamily::MetricVoxel, 0),
            AutoLoadError::NoMatch("no file for (0, 0, 0)".into()),
        );
        report.record(
            LoaderId::new(LoaderFamily::Cluster, 2),
            Err(AutoLoadError::NotSupported),
        );
        report.record(LoaderId::new(LoaderFamily::Cluster, 3), Ok(()));

        assert_eq!(
            report.to_string(),
            "Auto Load Metric 1: no file for (0, 0, 0)\n\
             Auto Load Cluster 3: not supported by this loader"
        );
    }

    #[test]
    fn test_collect_and_filesystem_flag() {
        assert_eq!(AutoLoadError::collect(vec![]), Ok(()));
        let several = AutoLoadError::collect(vec![
            AutoLoadError::PathInvalid("a".into()),
            AutoLoadError::ReadFailed("b".into()),
        ])
        .unwrap_err();
        assert_eq!(several.to_string(), "a; b");
        assert!(several.reached_filesystem());
        assert!(!AutoLoadError::BadProbe("invalid voxel".into()).reached_filesystem());
    }
}
