//! Filesystem access used by the scanner.
//!
//! The scanner only ever needs two operations: stat a path without following
//! symlinks, and list a directory's entry names. Both report failure as
//! `None` instead of an error, so a single unreadable node can never abort a
//! traversal.

use std::ffi::OsString;
use std::future::Future;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Type of filesystem node as reported by a non-following stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (never followed).
    Symlink,
    /// Other file types (sockets, devices, fifos).
    Other,
}

/// Result of a successful stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStat {
    /// Node type.
    pub kind: NodeKind,
    /// Size in bytes as reported for the node itself.
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
}

impl NodeStat {
    /// Build a stat from `std` metadata obtained without following links.
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        let file_type = metadata.file_type();
        let kind = if file_type.is_symlink() {
            NodeKind::Symlink
        } else if file_type.is_dir() {
            NodeKind::Directory
        } else if file_type.is_file() {
            NodeKind::File
        } else {
            NodeKind::Other
        };

        Self {
            kind,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(UNIX_EPOCH),
        }
    }
}

/// The two filesystem operations a scan depends on.
///
/// Each call is a suspension point. Implementations must not block the
/// executor and must never panic on I/O failure.
pub trait FileSystem: Send + Sync {
    /// Stat `path` without following symlinks. `None` if unavailable.
    fn stat(&self, path: &Path) -> impl Future<Output = Option<NodeStat>> + Send;

    /// Entry names of the directory at `path`, in listing order. `None` if
    /// the directory cannot be read.
    fn list_dir(&self, path: &Path) -> impl Future<Output = Option<Vec<OsString>>> + Send;
}

/// The real filesystem, accessed through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

impl FileSystem for TokioFs {
    async fn stat(&self, path: &Path) -> Option<NodeStat> {
        let metadata = tokio::fs::symlink_metadata(path).await.ok()?;
        Some(NodeStat::from_metadata(&metadata))
    }

    async fn list_dir(&self, path: &Path) -> Option<Vec<OsString>> {
        let mut read_dir = tokio::fs::read_dir(path).await.ok()?;
        let mut names = Vec::new();
        while let Some(entry) = read_dir.next_entry().await.ok()? {
            names.push(entry.file_name());
        }
        Some(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_stat_kinds() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        std::fs::write(&file, "hello").unwrap();

        let dir_stat = TokioFs.stat(temp.path()).await.unwrap();
        assert_eq!(dir_stat.kind, NodeKind::Directory);

        let file_stat = TokioFs.stat(&file).await.unwrap();
        assert_eq!(file_stat.kind, NodeKind::File);
        assert_eq!(file_stat.size, 5);
    }

    #[tokio::test]
    async fn test_missing_path_is_none() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(TokioFs.stat(&missing).await.is_none());
        assert!(TokioFs.list_dir(&missing).await.is_none());
    }

    #[tokio::test]
    async fn test_list_dir_names() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("one"), "").unwrap();
        std::fs::create_dir(temp.path().join("two")).unwrap();

        let mut names = TokioFs.list_dir(temp.path()).await.unwrap();
        names.sort();
        assert_eq!(names, [OsString::from("one"), OsString::from("two")]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_not_followed() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        std::fs::create_dir(&target).unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert_eq!(TokioFs.stat(&link).await.unwrap().kind, NodeKind::Symlink);
    }
}
