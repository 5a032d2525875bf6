//! Record filtering.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use sweepfile_core::FileRecord;

/// Conditions a record must satisfy to stay in the view.
///
/// All conditions are combined with AND. The default filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct FileFilter {
    /// Minimum size in bytes (inclusive).
    pub min_size: u64,

    /// Keep only records with at least one suspicious label.
    pub suspicious_only: bool,

    /// Allowed extensions, lowercased and without the leading dot.
    /// Empty means any extension.
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Create a new filter builder.
    pub fn builder() -> FileFilterBuilder {
        FileFilterBuilder::default()
    }

    /// Parse a comma-separated extension list such as `"zip, .DMG"`.
    pub fn parse_extensions(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    /// Check a single record.
    pub fn matches(&self, record: &FileRecord) -> bool {
        if record.size < self.min_size {
            return false;
        }
        if self.suspicious_only && !record.is_suspicious() {
            return false;
        }
        if !self.extensions.is_empty() {
            let ext = record.extension();
            if !self.extensions.iter().any(|allowed| *allowed == ext) {
                return false;
            }
        }
        true
    }

    /// Records that pass the filter, in their original order.
    pub fn apply<'a>(&self, records: &'a [FileRecord]) -> Vec<&'a FileRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensions() {
        assert_eq!(
            FileFilter::parse_extensions(" zip, .DMG ,,log "),
            ["zip", "dmg", "log"]
        );
        assert!(FileFilter::parse_extensions("  ").is_empty());
    }

    #[test]
    fn test_builder_defaults() {
        let filter = FileFilter::builder().min_size(10u64).build().unwrap();
        assert_eq!(filter.min_size, 10);
        assert!(!filter.suspicious_only);
        assert!(filter.extensions.is_empty());
    }
}
