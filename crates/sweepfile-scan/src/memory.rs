//! In-memory filesystem.
//!
//! Lets callers describe a tree, including unreadable directories and paths
//! that vanish between listing and stat, and scan it without touching disk.
//! Listing order is insertion order.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use crate::fs::{FileSystem, NodeKind, NodeStat};

#[derive(Debug, Clone)]
enum MemoryNode {
    File { size: u64, modified: SystemTime },
    Dir { children: Vec<OsString>, readable: bool },
    Special(NodeKind),
    Vanished,
}

/// A scriptable filesystem held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    nodes: HashMap<PathBuf, MemoryNode>,
    listed: Arc<Mutex<Vec<PathBuf>>>,
}

impl MemoryFs {
    /// Create an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a readable directory (and any missing parents).
    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.ensure_dir(path.as_ref());
        self
    }

    /// Add a directory whose listing always fails.
    pub fn unreadable_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.ensure_dir(path);
        if let Some(MemoryNode::Dir { readable, .. }) = self.nodes.get_mut(path) {
            *readable = false;
        }
        self
    }

    /// Add a regular file.
    pub fn file(mut self, path: impl AsRef<Path>, size: u64, modified: SystemTime) -> Self {
        self.insert(path.as_ref(), MemoryNode::File { size, modified });
        self
    }

    /// Add a symlink. It is listed but never followed.
    pub fn symlink(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryNode::Special(NodeKind::Symlink));
        self
    }

    /// Add a device, socket or fifo.
    pub fn special(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryNode::Special(NodeKind::Other));
        self
    }

    /// Add an entry that shows up in its parent's listing but cannot be stat'ed.
    pub fn vanished(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), MemoryNode::Vanished);
        self
    }

    /// Directories listed so far, in call order.
    pub fn listed(&self) -> Vec<PathBuf> {
        self.listed
            .lock()
            .map(|listed| listed.clone())
            .unwrap_or_default()
    }

    fn insert(&mut self, path: &Path, node: MemoryNode) {
        self.link_to_parent(path);
        self.nodes.insert(path.to_path_buf(), node);
    }

    fn ensure_dir(&mut self, path: &Path) {
        if matches!(self.nodes.get(path), Some(MemoryNode::Dir { .. })) {
            return;
        }
        self.link_to_parent(path);
        self.nodes.insert(
            path.to_path_buf(),
            MemoryNode::Dir {
                children: Vec::new(),
                readable: true,
            },
        );
    }

    fn link_to_parent(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        if parent.as_os_str().is_empty() {
            return;
        }
        self.ensure_dir(parent);
        if let Some(MemoryNode::Dir { children, .. }) = self.nodes.get_mut(parent) {
            if !children.iter().any(|c| c == name) {
                children.push(name.to_os_string());
            }
        }
    }
}

impl FileSystem for MemoryFs {
    async fn stat(&self, path: &Path) -> Option<NodeStat> {
        match self.nodes.get(path)? {
            MemoryNode::File { size, modified } => Some(NodeStat {
                kind: NodeKind::File,
                size: *size,
                modified: *modified,
            }),
            MemoryNode::Dir { .. } => Some(NodeStat {
                kind: NodeKind::Directory,
                size: 0,
                modified: SystemTime::UNIX_EPOCH,
            }),
            MemoryNode::Special(kind) => Some(NodeStat {
                kind: *kind,
                size: 0,
                modified: SystemTime::UNIX_EPOCH,
            }),
            MemoryNode::Vanished => None,
        }
    }

    async fn list_dir(&self, path: &Path) -> Option<Vec<OsString>> {
        if let Ok(mut listed) = self.listed.lock() {
            listed.push(path.to_path_buf());
        }
        match self.nodes.get(path)? {
            MemoryNode::Dir {
                children,
                readable: true,
            } => Some(children.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parents_created_in_insertion_order() {
        let now = SystemTime::now();
        let fs = MemoryFs::new()
            .file("/r/b.txt", 1, now)
            .file("/r/a.txt", 2, now)
            .dir("/r/sub");

        let names = fs.list_dir(Path::new("/r")).await.unwrap();
        assert_eq!(names, ["b.txt", "a.txt", "sub"]);
        assert_eq!(
            fs.stat(Path::new("/r/sub")).await.unwrap().kind,
            NodeKind::Directory
        );
    }

    #[tokio::test]
    async fn test_unreadable_and_vanished() {
        let fs = MemoryFs::new().unreadable_dir("/r/locked").vanished("/r/gone");

        assert!(fs.stat(Path::new("/r/locked")).await.is_some());
        assert!(fs.list_dir(Path::new("/r/locked")).await.is_none());
        assert!(fs.stat(Path::new("/r/gone")).await.is_none());
        assert_eq!(
            fs.listed(),
            [PathBuf::from("/r/locked")]
        );
    }
}
