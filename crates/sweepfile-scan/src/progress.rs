//! Scan progress reporting.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Progress information during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of file records collected so far.
    pub files_collected: u64,
    /// Total bytes of collected files.
    pub bytes_collected: u64,
    /// Number of skip records so far.
    pub skipped: u64,
    /// Last path visited.
    pub current_path: PathBuf,
    /// Time elapsed since the scan started.
    pub elapsed: Duration,
    /// Whether this is the final update for the scan.
    pub finished: bool,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_collected: 0,
            bytes_collected: 0,
            skipped: 0,
            current_path: PathBuf::new(),
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Calculate scan rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_collected as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-scan progress tracker with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    files_collected: u64,
    bytes_collected: u64,
    skipped: u64,
    current_path: PathBuf,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            files_collected: 0,
            bytes_collected: 0,
            skipped: 0,
            current_path: PathBuf::new(),
        }
    }

    pub fn record_file(&mut self, path: &Path, size: u64) {
        self.files_collected += 1;
        self.bytes_collected += size;
        self.current_path = path.to_path_buf();
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn files_collected(&self) -> u64 {
        self.files_collected
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self, finished: bool) -> ScanProgress {
        ScanProgress {
            files_collected: self.files_collected,
            bytes_collected: self.bytes_collected,
            skipped: self.skipped,
            current_path: self.current_path.clone(),
            elapsed: self.start_time.elapsed(),
            finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_snapshot() {
        let mut tracker = ProgressTracker::new();
        tracker.record_file(Path::new("/a/b"), 10);
        tracker.record_file(Path::new("/a/c"), 5);
        tracker.record_skip();

        let progress = tracker.snapshot(false);
        assert_eq!(progress.files_collected, 2);
        assert_eq!(progress.bytes_collected, 15);
        assert_eq!(progress.skipped, 1);
        assert_eq!(progress.current_path, PathBuf::from("/a/c"));
        assert!(!progress.finished);
    }

    #[test]
    fn test_rate_with_zero_elapsed() {
        assert_eq!(ScanProgress::new().files_per_second(), 0.0);
    }
}
