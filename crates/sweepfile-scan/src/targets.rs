//! Recommended scan targets and concurrent overview scans.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::debug;

use sweepfile_core::{ScanConfig, ScanError, ScanSummary};

use crate::fs::FileSystem;
use crate::scanner::Scanner;

/// A named location worth scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Stable identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Absolute path.
    pub path: PathBuf,
}

impl Target {
    /// Create a new target.
    pub fn new(id: impl Into<String>, label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Summary of one target's overview scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSummary {
    /// The scanned target.
    #[serde(flatten)]
    pub target: Target,
    /// Aggregates of the scan.
    pub summary: ScanSummary,
    /// Number of paths that could not be scanned.
    pub skipped: usize,
}

/// The default targets below a home directory.
pub fn default_targets(home: &Path) -> Vec<Target> {
    vec![
        Target::new("downloads", "Downloads", home.join("Downloads")),
        Target::new("desktop", "Desktop", home.join("Desktop")),
        Target::new("documents", "Documents", home.join("Documents")),
        Target::new(
            "caches",
            "Library/Caches",
            home.join("Library").join("Caches"),
        ),
    ]
}

/// Default targets below the current user's home directory.
pub fn home_targets() -> Option<Vec<Target>> {
    dirs::home_dir().map(|home| default_targets(&home))
}

/// Scan every target concurrently.
///
/// Each target gets its own traversal built from `template` (bounds and
/// reference time are kept, the root is replaced). Results are returned in
/// the order of `targets`.
pub async fn scan_targets<F>(
    scanner: Arc<Scanner<F>>,
    targets: Vec<Target>,
    template: &ScanConfig,
) -> Result<Vec<TargetSummary>, ScanError>
where
    F: FileSystem + 'static,
{
    let mut tasks = JoinSet::new();

    for (index, target) in targets.into_iter().enumerate() {
        let scanner = Arc::clone(&scanner);
        let config = template.with_root(&target.path);
        tasks.spawn(async move {
            let result = scanner.scan(&config).await;
            (index, target, result)
        });
    }

    let mut summaries = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, target, result) = joined.map_err(|e| ScanError::Other {
            message: e.to_string(),
        })?;
        let result = result?;
        debug!(
            id = %target.id,
            files = result.summary.total_files,
            "target scanned"
        );
        summaries.push((
            index,
            TargetSummary {
                target,
                summary: result.summary,
                skipped: result.skipped.len(),
            },
        ));
    }

    summaries.sort_by_key(|(index, _)| *index);
    Ok(summaries.into_iter().map(|(_, summary)| summary).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets() {
        let targets = default_targets(Path::new("/home/me"));
        let ids: Vec<_> = targets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["downloads", "desktop", "documents", "caches"]);
        assert_eq!(targets[3].path, PathBuf::from("/home/me/Library/Caches"));
        assert_eq!(targets[3].label, "Library/Caches");
    }

    #[test]
    fn test_summary_serializes_flat() {
        let summary = TargetSummary {
            target: Target::new("desktop", "Desktop", "/home/me/Desktop"),
            summary: ScanSummary::default(),
            skipped: 0,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], "desktop");
        assert_eq!(json["summary"]["totalFiles"], 0);
    }
}
