//! Filesystem scanning engine for sweepfile.
//!
//! This crate walks a directory tree depth-first, bounded by a maximum depth
//! and a soft cap on collected files, and classifies every regular file
//! against a [`RuleSet`].
//!
//! # Overview
//!
//! - **Sequential traversal** per scan; many scans can run concurrently
//! - **Never fails on a single node**: unreadable paths become skip records
//! - **Pluggable filesystem** through the [`FileSystem`] trait
//! - **Progress updates** via broadcast channels
//! - **Cancellation** via [`CancellationToken`]
//!
//! # Example
//!
//! ```rust,no_run
//! use sweepfile_scan::{ScanConfig, Scanner};
//!
//! # async fn run() -> Result<(), sweepfile_scan::ScanError> {
//! let config = ScanConfig::for_target("/path/to/scan");
//! let result = Scanner::new().scan(&config).await?;
//!
//! println!("Total size: {} bytes", result.summary.total_size);
//! println!("Flagged files: {}", result.summary.suspicious_count);
//! # Ok(())
//! # }
//! ```
//!
//! # Overview scans
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sweepfile_scan::{ScanConfig, Scanner, home_targets, scan_targets};
//!
//! # async fn run() -> Result<(), sweepfile_scan::ScanError> {
//! let targets = home_targets().unwrap_or_default();
//! let template = ScanConfig::for_overview(".");
//! for entry in scan_targets(Arc::new(Scanner::new()), targets, &template).await? {
//!     println!("{}: {} files", entry.target.label, entry.summary.total_files);
//! }
//! # Ok(())
//! # }
//! ```

mod fs;
#[cfg(any(test, feature = "test-util"))]
mod memory;
mod progress;
mod scanner;
mod targets;

pub use fs::{FileSystem, NodeKind, NodeStat, TokioFs};
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryFs;
pub use progress::ScanProgress;
pub use scanner::{Scanner, scan_directory};
pub use targets::{Target, TargetSummary, default_targets, home_targets, scan_targets};
pub use tokio_util::sync::CancellationToken;

// Re-export core types for convenience
pub use sweepfile_core::{
    FileRecord, RuleSet, ScanConfig, ScanError, ScanResult, ScanSummary, SkipReason, SkipRecord,
};
