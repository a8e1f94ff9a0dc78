//! Diagram document model.

use std::path::{Path, PathBuf};

/// A diagram document awaiting include resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    /// Document path. Its parent directory identifies the owning folder.
    pub path: PathBuf,
    /// Full diagram source text.
    pub content: String,
}

impl Diagram {
    /// Create a diagram from its path and source text.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Directory containing the document.
    ///
    /// Empty for a bare file name.
    #[must_use]
    pub fn parent_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir() {
        let diagram = Diagram::new("/ws/docs/flow.puml", "");
        assert_eq!(diagram.parent_dir(), Path::new("/ws/docs"));
    }

    #[test]
    fn test_parent_dir_bare_name() {
        let diagram = Diagram::new("flow.puml", "");
        assert_eq!(diagram.parent_dir(), Path::new(""));
    }
}
