//! Scan configuration types.

use std::path::PathBuf;
use std::time::SystemTime;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Default depth when none is given.
pub const DEFAULT_DEPTH: u32 = 4;
/// Default entry cap when none is given.
pub const DEFAULT_MAX_ENTRIES: usize = 3000;

/// Depth used when the user explicitly asks to scan a path.
pub const TARGET_DEPTH: u32 = 5;
/// Entry cap used when the user explicitly asks to scan a path.
pub const TARGET_MAX_ENTRIES: usize = 4000;

/// Depth used for the quick overview of default targets.
pub const OVERVIEW_DEPTH: u32 = 4;
/// Entry cap used for the quick overview of default targets.
pub const OVERVIEW_MAX_ENTRIES: usize = 2000;

/// Configuration for a single scan invocation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Maximum directory levels below the root that are expanded.
    ///
    /// A directory at `level == depth` is not listed.
    #[builder(default = "DEFAULT_DEPTH")]
    #[serde(default = "default_depth")]
    pub depth: u32,

    /// Number of file records after which traversal stops opening new nodes.
    #[builder(default = "DEFAULT_MAX_ENTRIES")]
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Reference time for age calculations (None = now, captured at scan start).
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_time: Option<SystemTime>,
}

fn default_depth() -> u32 {
    DEFAULT_DEPTH
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                Err("Root path cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Root path is required".to_string()),
        }
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a config with default bounds.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            depth: DEFAULT_DEPTH,
            max_entries: DEFAULT_MAX_ENTRIES,
            reference_time: None,
        }
    }

    /// Config for an explicit, user-requested scan of one path.
    pub fn for_target(root: impl Into<PathBuf>) -> Self {
        Self::new(root).with_bounds(TARGET_DEPTH, TARGET_MAX_ENTRIES)
    }

    /// Config for the lighter overview scan of a default target.
    pub fn for_overview(root: impl Into<PathBuf>) -> Self {
        Self::new(root).with_bounds(OVERVIEW_DEPTH, OVERVIEW_MAX_ENTRIES)
    }

    /// Replace depth and entry cap.
    pub fn with_bounds(mut self, depth: u32, max_entries: usize) -> Self {
        self.depth = depth;
        self.max_entries = max_entries;
        self
    }

    /// Same bounds and reference time, different root.
    pub fn with_root(&self, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..self.clone()
        }
    }

    /// Reject malformed roots before any traversal starts.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.root.as_os_str().is_empty() {
            return Err(ScanError::invalid_root("Root path cannot be empty"));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .depth(2u32)
            .max_entries(10usize)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.depth, 2);
        assert_eq!(config.max_entries, 10);
        assert!(config.reference_time.is_none());
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        let err = ScanConfig::builder().root("").build().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));

        let err = ScanConfig::builder().build().unwrap_err();
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn test_builder_error_converts_to_invalid_root() {
        let err: ScanError = ScanConfig::builder().root("").build().unwrap_err().into();
        assert!(matches!(err, ScanError::InvalidRoot { .. }));
    }

    #[test]
    fn test_presets() {
        let target = ScanConfig::for_target("/tmp");
        assert_eq!((target.depth, target.max_entries), (5, 4000));

        let overview = ScanConfig::for_overview("/tmp");
        assert_eq!((overview.depth, overview.max_entries), (4, 2000));

        let simple = ScanConfig::new("/tmp");
        assert_eq!((simple.depth, simple.max_entries), (4, 3000));
    }

    #[test]
    fn test_with_root_keeps_bounds() {
        let base = ScanConfig::for_overview("/a");
        let moved = base.with_root("/b");
        assert_eq!(moved.root, PathBuf::from("/b"));
        assert_eq!(moved.max_entries, base.max_entries);
    }

    #[test]
    fn test_validate() {
        assert!(ScanConfig::new("/tmp").validate().is_ok());
        assert!(matches!(
            ScanConfig::new("").validate(),
            Err(ScanError::InvalidRoot { .. })
        ));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: ScanConfig = serde_json::from_str(r#"{"root":"/data"}"#).unwrap();
        assert_eq!(config.depth, DEFAULT_DEPTH);
        assert_eq!(config.max_entries, DEFAULT_MAX_ENTRIES);
    }
}
