//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for checking and listing include files on the local
//! filesystem.

use std::fs;
use std::path::Path;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Paths are used as given: relative paths resolve against the process working
/// directory. Failed `stat` calls other than "not found" are logged at debug
/// level and reported as missing.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use pinc_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new();
/// assert!(storage.exists(Path::new("Cargo.toml")));
/// ```
#[derive(Debug, Default)]
pub struct FsStorage;

impl FsStorage {
    /// Create a new filesystem storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Stat a path, logging unexpected failures.
    fn metadata(path: &Path) -> Option<fs::Metadata> {
        match fs::metadata(path) {
            Ok(meta) => Some(meta),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Failed to stat path");
                None
            }
        }
    }
}

impl Storage for FsStorage {
    fn exists(&self, path: &Path) -> bool {
        Self::metadata(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        Self::metadata(path).is_some_and(|m| m.is_dir())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, StorageError> {
        let entries = fs::read_dir(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    return Err(StorageError::new(StorageErrorKind::InvalidPath)
                        .with_path(path.join(raw))
                        .with_backend(BACKEND));
                }
            }
        }
        Ok(names)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn create_test_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    #[test]
    fn test_exists_file_and_dir() {
        let temp_dir = create_test_dir();
        let file = temp_dir.path().join("common.iuml");
        fs::write(&file, "skinparam monochrome true").unwrap();

        let storage = FsStorage::new();

        assert!(storage.exists(&file));
        assert!(storage.exists(temp_dir.path()));
        assert!(!storage.exists(&temp_dir.path().join("missing.iuml")));
    }

    #[test]
    fn test_is_dir() {
        let temp_dir = create_test_dir();
        let file = temp_dir.path().join("common.iuml");
        fs::write(&file, "").unwrap();

        let storage = FsStorage::new();

        assert!(storage.is_dir(temp_dir.path()));
        assert!(!storage.is_dir(&file));
        assert!(!storage.is_dir(&temp_dir.path().join("missing")));
    }

    #[test]
    fn test_exists_malformed_path_is_false() {
        let storage = FsStorage::new();

        assert!(!storage.exists(Path::new("bad\0path")));
        assert!(!storage.is_dir(Path::new("bad\0path")));
    }

    #[test]
    fn test_list_dir_returns_names() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("a.iuml"), "").unwrap();
        fs::write(temp_dir.path().join("b.iuml"), "").unwrap();

        let storage = FsStorage::new();
        let mut names = storage.list_dir(temp_dir.path()).unwrap();
        names.sort();

        assert_eq!(names, vec!["a.iuml".to_owned(), "b.iuml".to_owned()]);
    }

    #[test]
    fn test_list_dir_missing() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new();

        let err = storage
            .list_dir(&temp_dir.path().join("missing"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_read() {
        let temp_dir = create_test_dir();
        let file = temp_dir.path().join("diagram.puml");
        fs::write(&file, "@startuml\nA -> B\n@enduml").unwrap();

        let storage = FsStorage::new();

        assert_eq!(storage.read(&file).unwrap(), "@startuml\nA -> B\n@enduml");
    }

    #[test]
    fn test_read_missing() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new();

        let err = storage
            .read(&temp_dir.path().join("missing.puml"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.downcast_source::<std::io::Error>().is_some());
    }
}
