//! Bounded depth-first scanner.

use std::path::PathBuf;
use std::time::SystemTime;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use sweepfile_core::{FileRecord, RuleSet, ScanConfig, ScanError, ScanResult, SkipRecord};

use crate::fs::{FileSystem, NodeKind, TokioFs};
use crate::progress::{ProgressTracker, ScanProgress};

/// A progress update is broadcast every this many collected files.
const PROGRESS_INTERVAL: u64 = 256;

const PROGRESS_CHANNEL_SIZE: usize = 100;

/// Sequential, depth- and count-bounded directory scanner.
///
/// Each call to [`scan`](Self::scan) owns its own traversal state, so one
/// scanner can serve many concurrent scans; the only shared piece is the
/// immutable rule set.
pub struct Scanner<F = TokioFs> {
    fs: F,
    rules: RuleSet,
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl Scanner<TokioFs> {
    /// Create a scanner over the real filesystem with the built-in rules.
    pub fn new() -> Self {
        Self::with_fs(TokioFs)
    }
}

impl Default for Scanner<TokioFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> Scanner<F> {
    /// Create a scanner over a custom filesystem.
    pub fn with_fs(fs: F) -> Self {
        let (progress_tx, _) = broadcast::channel(PROGRESS_CHANNEL_SIZE);
        Self {
            fs,
            rules: RuleSet::default(),
            progress_tx,
        }
    }

    /// Replace the rule set.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// The rule set used for classification.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The underlying filesystem.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Scan `config.root`.
    ///
    /// Only a malformed root is an error. Every per-node failure is recorded
    /// in [`ScanResult::skipped`].
    pub async fn scan(&self, config: &ScanConfig) -> Result<ScanResult, ScanError> {
        self.scan_with_cancel(config, &CancellationToken::new()).await
    }

    /// Scan `config.root`, stopping with [`ScanError::Cancelled`] once
    /// `cancel` fires. The token is checked before every node visit.
    pub async fn scan_with_cancel(
        &self,
        config: &ScanConfig,
        cancel: &CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        config.validate()?;

        let now = config.reference_time.unwrap_or_else(SystemTime::now);
        let mut tracker = ProgressTracker::new();
        let mut files: Vec<FileRecord> = Vec::new();
        let mut skipped: Vec<SkipRecord> = Vec::new();

        debug!(
            root = %config.root.display(),
            depth = config.depth,
            max_entries = config.max_entries,
            "starting scan"
        );

        // Children are pushed in reverse so pops follow listing order.
        let mut stack: Vec<(PathBuf, u32)> = vec![(config.root.clone(), 0)];

        while let Some((path, level)) = stack.pop() {
            if cancel.is_cancelled() {
                debug!(root = %config.root.display(), "scan cancelled");
                return Err(ScanError::Cancelled);
            }

            if files.len() >= config.max_entries {
                debug!(
                    root = %config.root.display(),
                    max_entries = config.max_entries,
                    pending = stack.len() + 1,
                    "entry cap reached"
                );
                break;
            }

            let Some(stat) = self.fs.stat(&path).await else {
                trace!(path = %path.display(), reason = "permission_or_missing", "skipping");
                tracker.record_skip();
                skipped.push(SkipRecord::permission_or_missing(path));
                continue;
            };

            match stat.kind {
                NodeKind::File => {
                    let record =
                        FileRecord::classify(&path, stat.size, stat.modified, now, &self.rules);
                    tracker.record_file(&path, record.size);
                    files.push(record);

                    if tracker.files_collected() % PROGRESS_INTERVAL == 0 {
                        let _ = self.progress_tx.send(tracker.snapshot(false));
                    }
                }
                NodeKind::Directory if level < config.depth => {
                    match self.fs.list_dir(&path).await {
                        Some(names) => {
                            stack.extend(
                                names
                                    .into_iter()
                                    .rev()
                                    .map(|name| (path.join(name), level + 1)),
                            );
                        }
                        None => {
                            trace!(path = %path.display(), reason = "listing_failed", "skipping");
                            tracker.record_skip();
                            skipped.push(SkipRecord::listing_failed(path));
                        }
                    }
                }
                // Directories at the depth bound, symlinks and special files
                // are silently left out.
                NodeKind::Directory | NodeKind::Symlink | NodeKind::Other => {}
            }
        }

        let _ = self.progress_tx.send(tracker.snapshot(true));

        let result = ScanResult::new(config.root.clone(), files, skipped);
        debug!(
            root = %config.root.display(),
            files = result.summary.total_files,
            skipped = result.skipped.len(),
            elapsed_ms = tracker.elapsed().as_millis() as u64,
            "scan finished"
        );

        Ok(result)
    }
}

/// Scan `root` on the real filesystem with the built-in rules.
pub async fn scan_directory(
    root: impl Into<PathBuf>,
    depth: u32,
    max_entries: usize,
) -> Result<ScanResult, ScanError> {
    let config = ScanConfig::new(root).with_bounds(depth, max_entries);
    Scanner::new().scan(&config).await
}
