//! Selection of records for deletion requests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sweepfile_core::FileRecord;

/// A set of selected records, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    paths: HashSet<PathBuf>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a path. Returns `true` if it was not already selected.
    pub fn select(&mut self, path: impl Into<PathBuf>) -> bool {
        self.paths.insert(path.into())
    }

    /// Deselect a path. Returns `true` if it was selected.
    pub fn deselect(&mut self, path: &Path) -> bool {
        self.paths.remove(path)
    }

    /// Flip a path's selection. Returns the new state.
    pub fn toggle(&mut self, path: &Path) -> bool {
        if self.paths.remove(path) {
            false
        } else {
            self.paths.insert(path.to_path_buf());
            true
        }
    }

    /// Check whether a path is selected.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Drop every selected path.
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Number of selected paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Selected records, in the order they appear in `records`.
    pub fn selected_records<'a>(&self, records: &'a [FileRecord]) -> Vec<&'a FileRecord> {
        records
            .iter()
            .filter(|r| self.paths.contains(&r.path))
            .collect()
    }

    /// Total size of the selected records in `records`.
    pub fn selected_bytes(&self, records: &[FileRecord]) -> u64 {
        self.selected_records(records).iter().map(|r| r.size).sum()
    }

    /// Remove selected records from `records` and clear the selection.
    ///
    /// Call after the selected files were successfully deleted.
    pub fn retain_unselected(&mut self, records: &mut Vec<FileRecord>) {
        records.retain(|r| !self.paths.contains(&r.path));
        self.clear();
    }
}
