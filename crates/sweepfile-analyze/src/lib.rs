//! View operations over sweepfile scan results.
//!
//! A scan produces a flat list of classified [`FileRecord`]s. This crate
//! provides what a front end needs to present them without re-deriving any
//! classification:
//!
//! - **Filtering** by minimum size, suspicious-only and extension allow-list
//! - **Sorting** by name, size, date or origin in either direction
//! - **Selection** of records by path for deletion requests
//!
//! ```rust
//! use sweepfile_analyze::{FileFilter, SortKey, SortOrder, SortState, apply};
//!
//! let filter = FileFilter::builder()
//!     .min_size(1024u64 * 1024)
//!     .suspicious_only(true)
//!     .build()
//!     .unwrap();
//! let view = apply(&[], &filter, SortState::new(SortKey::Size, SortOrder::Descending));
//! assert!(view.is_empty());
//! ```

mod filter;
mod selection;
mod sort;

pub use filter::{FileFilter, FileFilterBuilder};
pub use selection::Selection;
pub use sort::{SortKey, SortOrder, SortState, compare, sort_records};

// Re-export core types
pub use sweepfile_core::{FileRecord, ScanResult, ScanSummary};

/// Filter then sort: the records to display, as owned copies.
pub fn apply(records: &[FileRecord], filter: &FileFilter, sort: SortState) -> Vec<FileRecord> {
    let mut view: Vec<FileRecord> = filter.apply(records).into_iter().cloned().collect();
    sort.sort(&mut view);
    view
}
