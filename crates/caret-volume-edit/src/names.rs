// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

//! Name -> color lookup (area colors).

use ahash::AHashMap;

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Maps paint/border/focus names to display colors
pub trait NameLookup {
    fn color_for_name(&self, name: &str) -> Option<Rgb>;

    fn add_color(&mut self, name: &str, color: Rgb);

    /// Add `default` for `name` unless a color exists; true if one was added
    fn ensure_color(&mut self, name: &str, default: Rgb) -> bool {
        if self.color_for_name(name).is_some() {
            return false;
        }
        self.add_color(name, default);
        true
    }
}

/// In-memory area color table
#[derive(Debug, Clone, Default)]
pub struct AreaColorTable {
    colors: AHashMap<String, Rgb>,
}

impl AreaColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl NameLookup for AreaColorTable {
    fn color_for_name(&self, name: &str) -> Option<Rgb> {
        self.colors.get(name).copied()
    }

    fn add_color(&mut self, name: &str, color: Rgb) {
        self.colors.insert(name.to_string(), color);
    }
}
