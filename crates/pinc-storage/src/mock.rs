//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Add `path` to the listing of each of its ancestors, creating them as needed.
fn register_ancestors(dirs: &mut HashMap<PathBuf, Vec<String>>, path: &Path) {
    let mut child = path;
    while let Some(parent) = child.parent() {
        if parent.as_os_str().is_empty() {
            break;
        }
        let Some(name) = child.file_name() else {
            break;
        };
        let name = name.to_string_lossy().into_owned();
        let entries = dirs.entry(parent.to_path_buf()).or_default();
        if !entries.contains(&name) {
            entries.push(name);
        }
        child = parent;
    }
}

/// Mock storage for testing.
///
/// Stores files and directories in memory. Use the builder methods
/// to configure the mock with test data. Directory listings follow
/// insertion order.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use pinc_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("/ws/styles/a.iuml", "skinparam monochrome true")
///     .with_file("/ws/styles/b.iuml", "skinparam shadowing false");
///
/// assert!(storage.is_dir(Path::new("/ws/styles")));
/// assert_eq!(storage.list_dir(Path::new("/ws/styles")).unwrap(), ["a.iuml", "b.iuml"]);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<HashMap<PathBuf, String>>,
    dirs: RwLock<HashMap<PathBuf, Vec<String>>>,
    denied: RwLock<HashSet<PathBuf>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content. Parent directories are created implicitly.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path: PathBuf = path.into();
        register_ancestors(&mut self.dirs.write().unwrap(), &path);
        self.files.write().unwrap().insert(path, content.into());
        self
    }

    /// Add an empty directory. Parent directories are created implicitly.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let mut dirs = self.dirs.write().unwrap();
        register_ancestors(&mut dirs, &path);
        dirs.entry(path).or_default();
        drop(dirs);
        self
    }

    /// Mark a directory as unreadable: it still exists, but listing it fails
    /// with [`StorageErrorKind::PermissionDenied`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_denied_dir(self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let storage = self.with_dir(path.clone());
        storage.denied.write().unwrap().insert(path);
        storage
    }
}

impl Storage for MockStorage {
    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.read().unwrap().contains_key(path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, StorageError> {
        if self.denied.read().unwrap().contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.dirs
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }
}
