//! Collaborator traits for include resolution.
//!
//! The includer asks an [`IncludeSource`] which specifiers apply to a folder and
//! a [`FolderResolver`] which folder owns a document. [`pinc_config::Config`]
//! implements both.

use std::path::{Path, PathBuf};

use pinc_config::Config;

/// Source of include specifiers for a workspace folder.
pub trait IncludeSource: Send + Sync {
    /// Ordered include specifiers for a folder.
    ///
    /// `None` means the document has no workspace folder. The result must be
    /// deterministic for a given configuration state.
    fn include_specifiers(&self, folder: Option<&Path>) -> Vec<String>;
}

/// Maps a document to the workspace folder containing it.
pub trait FolderResolver: Send + Sync {
    /// Root path of the folder owning `document`, if any.
    fn owning_folder(&self, document: &Path) -> Option<PathBuf>;
}

impl IncludeSource for Config {
    fn include_specifiers(&self, folder: Option<&Path>) -> Vec<String> {
        self.specifiers_for(folder).to_vec()
    }
}

impl FolderResolver for Config {
    fn owning_folder(&self, document: &Path) -> Option<PathBuf> {
        Config::owning_folder(self, document).map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use pinc_config::FolderConfig;

    use super::*;

    fn config_with_specifiers(specifiers: &[&str]) -> Config {
        let mut config = Config::default();
        config.folders_resolved.clear();
        config.includes_resolved.specifiers = specifiers.iter().map(|s| (*s).to_owned()).collect();
        config
    }

    #[test]
    fn test_config_include_source() {
        let config = config_with_specifiers(&["styles", "/abs/x.iuml"]);

        assert_eq!(
            config.include_specifiers(None),
            vec!["styles".to_owned(), "/abs/x.iuml".to_owned()]
        );
    }

    #[test]
    fn test_config_folder_resolver() {
        let mut config = config_with_specifiers(&[]);
        config.folders_resolved.push(FolderConfig {
            root: PathBuf::from("/ws"),
            specifiers: None,
        });

        let resolver: &dyn FolderResolver = &config;

        assert_eq!(
            resolver.owning_folder(Path::new("/ws/docs")),
            Some(PathBuf::from("/ws"))
        );
        assert_eq!(resolver.owning_folder(Path::new("/other")), None);
    }
}
