//! Path-backed file handles.
//!
//! A [`FileHandle`] names a file; it never opens, stats or otherwise touches
//! the filesystem. Clones share the same underlying path allocation, which is
//! what [`FileHandle::same_handle`] compares.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};

#[derive(Debug, Clone)]
pub struct FileHandle {
    path: Arc<PathBuf>,
}

impl FileHandle {
    /// Create a handle for `path` without any validation.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Arc::new(path.as_ref().to_path_buf()),
        }
    }

    /// Create a handle from a string path.
    ///
    /// Rejects the empty string and strings containing NUL bytes, neither of
    /// which can name a file.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(anyhow!("Cannot create a file handle from an empty path"));
        }
        if s.contains('\0') {
            return Err(anyhow!(
                "Invalid file path '{}': contains a NUL byte",
                s.escape_default()
            ));
        }
        Ok(Self::new(s))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The final path component, if it is valid UTF-8.
    pub fn basename(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Handle for the containing directory.
    pub fn parent(&self) -> Option<FileHandle> {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(FileHandle::new)
    }

    pub fn join(&self, segment: impl AsRef<Path>) -> FileHandle {
        FileHandle::new(self.path.join(segment))
    }

    /// Whether both handles are the same object, not merely equal paths.
    pub fn same_handle(&self, other: &FileHandle) -> bool {
        Arc::ptr_eq(&self.path, &other.path)
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FileHandle {}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl FromStr for FileHandle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
