// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! File name grammar of the auto-load archives.
//!
//! Voxel-keyed files end in `_<i>_<j>_<k><ext>`, node-keyed files in
//! `_<n><ext>`. Matching ignores case and the captured integers must equal
//! the probe exactly. A name carrying more keys than the pattern expects,
//! such as `foo_1_10_20_30.nii.gz` for a voxel, does not match.

use regex::{Regex, RegexBuilder};

use crate::error::AutoLoadResult;

#[derive(Debug, Clone)]
pub struct FileNamePattern {
    regex: Regex,
    arity: usize,
}

impl FileNamePattern {
    /// `.*_(i)_(j)_(k)<ext>`
    pub fn voxel(extension: &str) -> AutoLoadResult<Self> {
        Self::build(3, extension)
    }

    /// `.*_(n)<ext>`
    pub fn node(extension: &str) -> AutoLoadResult<Self> {
        Self::build(1, extension)
    }

    fn build(arity: usize, extension: &str) -> AutoLoadResult<Self> {
        let keys = "_([0-9]+)".repeat(arity);
        let source = format!("^(.*){}{}$", keys, regex::escape(extension));
        let regex = RegexBuilder::new(&source).case_insensitive(true).build()?;
        Ok(Self { regex, arity })
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Integers captured from `file_name`, or `None` if it does not match
    pub fn captures(&self, file_name: &str) -> Option<Vec<u64>> {
        let caps = self.regex.captures(file_name)?;
        let prefix = caps.get(1).map_or("", |m| m.as_str());
        if ends_with_key(prefix) {
            return None;
        }
        (2..=self.arity + 1)
            .map(|i| caps.get(i).and_then(|m| m.as_str().parse().ok()))
            .collect()
    }

    /// First entry whose captured integers equal `key`
    pub fn find_first<'a>(&self, entries: &'a [String], key: &[u64]) -> Option<&'a str> {
        entries
            .iter()
            .find(|name| self.captures(name).as_deref() == Some(key))
            .map(String::as_str)
    }
}

/// True when `prefix` ends in `_<digits>`
fn ends_with_key(prefix: &str) -> bool {
    let stem = prefix.trim_end_matches(|c: char| c.is_ascii_digit());
    stem.len() < prefix.len() && stem.ends_with('_')
}

/// Name of the file a cluster loader reads for paint label `label`
pub fn cluster_file_name(prefix: &str, label: i32, extension: &str) -> String {
    format!("{}{}{}", prefix, label, extension)
}
