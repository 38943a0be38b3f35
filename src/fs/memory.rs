use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use super::{EntryKind, FileSystem};

#[derive(Debug, Clone)]
enum Node {
    File(u64),
    Directory,
    Symlink(Option<PathBuf>),
    Other,
}

/// Synthetic tree for exercising the estimator without touching disk.
///
/// Records every path that gets classified, so tests can see which
/// children were actually visited.
#[derive(Debug, Default)]
pub(crate) struct MemoryFileSystem {
    nodes: BTreeMap<PathBuf, Node>,
    unreadable: HashSet<PathBuf>,
    unlistable: HashSet<PathBuf>,
    broken: HashSet<PathBuf>,
    visited: RefCell<Vec<PathBuf>>,
}

impl MemoryFileSystem {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, path: &str, node: Node) -> &mut Self {
        let path = PathBuf::from(path);
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.nodes
                .entry(dir.to_path_buf())
                .or_insert(Node::Directory);
            parent = dir.parent();
        }
        self.nodes.insert(path, node);
        self
    }

    pub(crate) fn file(&mut self, path: &str, len: u64) -> &mut Self {
        self.insert(path, Node::File(len))
    }

    pub(crate) fn dir(&mut self, path: &str) -> &mut Self {
        self.insert(path, Node::Directory)
    }

    /// A dangling symlink.
    pub(crate) fn symlink(&mut self, path: &str) -> &mut Self {
        self.insert(path, Node::Symlink(None))
    }

    /// A symlink at `path` pointing to the absolute `target`.
    pub(crate) fn link(&mut self, path: &str, target: &str) -> &mut Self {
        self.insert(path, Node::Symlink(Some(PathBuf::from(target))))
    }

    pub(crate) fn device(&mut self, path: &str) -> &mut Self {
        self.insert(path, Node::Other)
    }

    /// Fails the read permission probe.
    pub(crate) fn deny_read(&mut self, path: &str) -> &mut Self {
        self.unreadable.insert(PathBuf::from(path));
        self
    }

    /// Fails the search permission probe.
    pub(crate) fn deny_list(&mut self, path: &str) -> &mut Self {
        self.unlistable.insert(PathBuf::from(path));
        self
    }

    /// Passes the permission probes but fails to list.
    pub(crate) fn break_listing(&mut self, path: &str) -> &mut Self {
        self.broken.insert(PathBuf::from(path));
        self
    }

    pub(crate) fn visited(&self) -> Vec<PathBuf> {
        self.visited.borrow().clone()
    }

    pub(crate) fn visited_under(&self, dir: &str) -> usize {
        let dir = Path::new(dir);
        self.visited()
            .iter()
            .filter(|path| path.parent() == Some(dir))
            .count()
    }

    /// Follows symlinks in every component, the last one included.
    fn resolve(&self, path: &Path) -> PathBuf {
        let mut resolved = PathBuf::new();
        for component in path.components() {
            resolved.push(component);
            while let Some(Node::Symlink(Some(target))) = self.nodes.get(&resolved) {
                resolved = target.clone();
            }
        }
        resolved
    }

    /// Follows symlinks in the parent components only.
    fn locate(&self, path: &Path) -> PathBuf {
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => self.resolve(parent).join(name),
            _ => path.to_path_buf(),
        }
    }

    fn denied(&self, set: &HashSet<PathBuf>, path: &Path) -> bool {
        set.contains(path) || set.contains(&self.resolve(path))
    }
}

impl FileSystem for MemoryFileSystem {
    fn classify(&self, path: &Path) -> EntryKind {
        self.visited.borrow_mut().push(path.to_path_buf());
        match self.nodes.get(&self.locate(path)) {
            Some(Node::File(_)) => EntryKind::File,
            Some(Node::Directory) => EntryKind::Directory,
            Some(Node::Symlink(_)) => EntryKind::Symlink,
            Some(Node::Other) | None => EntryKind::Other,
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.get(&self.resolve(path)), Some(Node::Directory))
    }

    fn can_read(&self, path: &Path) -> bool {
        !self.denied(&self.unreadable, path)
    }

    fn can_list(&self, path: &Path) -> bool {
        !self.denied(&self.unlistable, path)
    }

    fn list_children(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if self.denied(&self.broken, path) {
            return Err(io::Error::new(io::ErrorKind::Other, "stale file handle"));
        }
        let dir = self.resolve(path);
        match self.nodes.get(&dir) {
            Some(Node::Directory) => Ok(self
                .nodes
                .keys()
                .filter(|child| child.parent() == Some(dir.as_path()))
                .filter_map(|child| child.file_name())
                .map(|name| path.join(name))
                .collect()),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "not a directory")),
        }
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        match self.nodes.get(&self.resolve(path)) {
            Some(Node::File(len)) => Ok(*len),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "not a file")),
        }
    }
}
