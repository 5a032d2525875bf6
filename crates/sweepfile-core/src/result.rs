//! Scan result container and summary statistics.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::record::{FileRecord, SkipRecord};

/// Aggregates over the files collected by one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Number of file records.
    pub total_files: u64,
    /// Sum of file sizes in bytes.
    pub total_size: u64,
    /// Number of records with at least one suspicious label.
    pub suspicious_count: u64,
}

impl ScanSummary {
    /// Reduce a list of records into a summary.
    pub fn from_files(files: &[FileRecord]) -> Self {
        files.iter().fold(Self::default(), |mut summary, file| {
            summary.total_files += 1;
            summary.total_size += file.size;
            if file.is_suspicious() {
                summary.suspicious_count += 1;
            }
            summary
        })
    }
}

/// Output of one traversal: a snapshot, never mutated across scans.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// The root that was requested.
    pub target_path: PathBuf,
    /// Classified files, in traversal order.
    pub files: Vec<FileRecord>,
    /// Paths that could not be scanned.
    pub skipped: Vec<SkipRecord>,
    /// Aggregates over `files`.
    pub summary: ScanSummary,
}

impl ScanResult {
    /// Assemble a result, computing the summary from `files`.
    pub fn new(
        target_path: impl Into<PathBuf>,
        files: Vec<FileRecord>,
        skipped: Vec<SkipRecord>,
    ) -> Self {
        let summary = ScanSummary::from_files(&files);
        Self {
            target_path: target_path.into(),
            files,
            skipped,
            summary,
        }
    }

    /// Whether the scan collected as many files as the cap allows.
    ///
    /// When true the result may be incomplete.
    pub fn reached_cap(&self, max_entries: usize) -> bool {
        self.files.len() >= max_entries
    }

    /// Iterate over flagged files only.
    pub fn suspicious_files(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.is_suspicious())
    }

    /// Look up a record by path.
    pub fn find(&self, path: &std::path::Path) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.path == path)
    }
}
