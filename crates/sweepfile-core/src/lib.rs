//! Core types and classification rules for sweepfile.
//!
//! This crate provides the data structures shared across the sweepfile
//! ecosystem: classified file records, skip records, scan results and
//! configuration, plus the ordered rule set that flags files as cleanup
//! candidates.

mod config;
mod error;
mod format;
mod record;
mod result;
pub mod rules;

pub use config::{
    DEFAULT_DEPTH, DEFAULT_MAX_ENTRIES, OVERVIEW_DEPTH, OVERVIEW_MAX_ENTRIES, ScanConfig,
    ScanConfigBuilder, TARGET_DEPTH, TARGET_MAX_ENTRIES,
};
pub use error::{ScanError, SkipReason};
pub use format::format_bytes;
pub use record::{FileRecord, SkipRecord, age_in_days};
pub use result::{ScanResult, ScanSummary};
pub use rules::{EntryView, Rule, RuleSet};
