//! Persistent user settings for the `sweep` binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sweepfile_analyze::{SortKey, SortOrder};
use sweepfile_core::{OVERVIEW_DEPTH, OVERVIEW_MAX_ENTRIES, TARGET_DEPTH, TARGET_MAX_ENTRIES};

/// Settings loaded from `<config_dir>/sweepfile/settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Bounds for `sweep scan`.
    pub scan: Bounds,
    /// Bounds for `sweep targets`.
    pub overview: OverviewBounds,
    /// Listing defaults.
    pub display: Display,
}

/// Traversal bounds for an explicit path scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub depth: u32,
    pub max_entries: usize,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            depth: TARGET_DEPTH,
            max_entries: TARGET_MAX_ENTRIES,
        }
    }
}

/// Traversal bounds for the default-target overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewBounds {
    pub depth: u32,
    pub max_entries: usize,
}

impl Default for OverviewBounds {
    fn default() -> Self {
        Self {
            depth: OVERVIEW_DEPTH,
            max_entries: OVERVIEW_MAX_ENTRIES,
        }
    }
}

/// How listings are ordered and truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    pub sort: SortKey,
    pub order: SortOrder,
    /// Rows shown in the text table.
    pub top: usize,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            order: SortOrder::default(),
            top: 50,
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sweepfile").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from a specific file, or return defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "ignoring malformed settings file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Bounds for `sweep scan`, as `(depth, max_entries)`.
    pub fn scan_bounds(&self) -> (u32, usize) {
        (self.scan.depth, self.scan.max_entries)
    }
}
