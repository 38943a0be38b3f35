use std::io;
use std::path::{Path, PathBuf};

use nix::unistd::{access, AccessFlags};

#[cfg(test)]
pub(crate) mod memory;

/// What a path turned out to be when it was inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    /// Devices, sockets, fifos, and anything that could not be inspected.
    Other,
}

/// The filesystem primitives the estimator needs.
///
/// Every call blocks the caller. `classify` never follows symbolic links;
/// `is_dir` does.
pub trait FileSystem {
    fn classify(&self, path: &Path) -> EntryKind;

    /// Whether `path` is a directory once symlinks are followed.
    fn is_dir(&self, path: &Path) -> bool;

    fn can_read(&self, path: &Path) -> bool;

    /// Whether a directory may be searched (execute permission).
    fn can_list(&self, path: &Path) -> bool;

    /// Immediate children of a directory, in a stable order.
    fn list_children(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    fn file_size(&self, path: &Path) -> io::Result<u64>;
}

/// The real filesystem of the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFileSystem;

impl FileSystem for HostFileSystem {
    fn classify(&self, path: &Path) -> EntryKind {
        match path.symlink_metadata() {
            Ok(metadata) => {
                let file_type = metadata.file_type();
                if file_type.is_symlink() {
                    EntryKind::Symlink
                } else if file_type.is_dir() {
                    EntryKind::Directory
                } else if file_type.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                }
            }
            Err(_) => EntryKind::Other,
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn can_read(&self, path: &Path) -> bool {
        access(path, AccessFlags::R_OK).is_ok()
    }

    fn can_list(&self, path: &Path) -> bool {
        access(path, AccessFlags::X_OK).is_ok()
    }

    fn list_children(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = std::fs::read_dir(path)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<io::Result<Vec<_>>>()?;
        children.sort();
        Ok(children)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(path.symlink_metadata()?.len())
    }
}
