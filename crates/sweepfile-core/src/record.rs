//! Classified file and skip record types.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::SkipReason;
use crate::format::format_bytes;
use crate::rules::{EntryView, RuleSet, normalize_separators};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Whole days elapsed between `modified` and `now`, floored.
///
/// Modification times in the future count as age zero.
pub fn age_in_days(modified: SystemTime, now: SystemTime) -> u64 {
    now.duration_since(modified)
        .unwrap_or(Duration::ZERO)
        .as_secs()
        / SECS_PER_DAY
}

/// One classified regular file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Base name.
    pub name: CompactString,

    /// Full path, unique within one scan.
    pub path: PathBuf,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time.
    pub modified_at: DateTime<Utc>,

    /// Whole days since last modification.
    pub age_days: u64,

    /// Parent directory.
    pub origin: PathBuf,

    /// Labels of every matching rule, in rule-definition order.
    pub suspicious: Vec<String>,
}

impl FileRecord {
    /// Build a record for a file and classify it against `rules`.
    pub fn classify(
        path: &Path,
        size: u64,
        modified: SystemTime,
        now: SystemTime,
        rules: &RuleSet,
    ) -> Self {
        let name: CompactString = path
            .file_name()
            .map(|n| n.to_string_lossy().into())
            .unwrap_or_else(|| path.to_string_lossy().into());
        let origin = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let age_days = age_in_days(modified, now);
        let path_str = normalize_separators(path);

        let suspicious = rules.classify(&EntryView {
            name: &name,
            size,
            path: &path_str,
            age_days,
        });

        Self {
            name,
            path: path.to_path_buf(),
            size,
            modified_at: DateTime::<Utc>::from(modified),
            age_days,
            origin,
            suspicious,
        }
    }

    /// Whether any rule flagged this file.
    pub fn is_suspicious(&self) -> bool {
        !self.suspicious.is_empty()
    }

    /// The first (highest in rule order) label, if any.
    pub fn primary_label(&self) -> Option<&str> {
        self.suspicious.first().map(String::as_str)
    }

    /// Human-readable size.
    pub fn size_label(&self) -> String {
        format_bytes(self.size)
    }

    /// Lowercased extension taken from the text after the last `.` in the name.
    pub fn extension(&self) -> String {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default()
    }
}

/// A path that could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipRecord {
    /// Path that was skipped.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: SkipReason,
}

impl SkipRecord {
    /// Create a new skip record.
    pub fn new(path: impl Into<PathBuf>, reason: SkipReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }

    /// Stat failed on this path.
    pub fn permission_or_missing(path: impl Into<PathBuf>) -> Self {
        Self::new(path, SkipReason::PermissionOrMissing)
    }

    /// Directory listing failed on this path.
    pub fn listing_failed(path: impl Into<PathBuf>) -> Self {
        Self::new(path, SkipReason::ListingFailed)
    }
}
