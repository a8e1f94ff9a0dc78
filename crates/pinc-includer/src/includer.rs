//! Autoinclude resolution for diagram documents.
//!
//! This module provides [`Includer`], which owns the per-folder
//! [`IncludeCache`] and splices resolved `!include` directives into diagrams.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pinc_config::Config;
use pinc_storage::Storage;

use crate::cache::{IncludeCache, SettingsFingerprint};
use crate::diagram::Diagram;
use crate::marker::splice;
use crate::resolve::{format_block, resolve_paths};
use crate::source::{FolderResolver, IncludeSource};

/// Adds configured `!include` directives to diagram sources.
///
/// Resolution results are cached per workspace folder and recomputed only
/// when the folder's specifier list changes (in content, not order). The
/// cache lives as long as the `Includer`; build one per service and share it.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use pinc_includer::{Diagram, Includer};
///
/// let includer = Includer::new(storage, source, folders, "/opt/pinc/includes");
///
/// let diagram = Diagram::new("/ws/docs/flow.puml", "@startuml\n'autoinclude\nA -> B\n@enduml");
/// let prepared = includer.add_includes(&diagram);
/// ```
pub struct Includer {
    /// Filesystem checks.
    storage: Arc<dyn Storage>,
    /// Configured specifiers per folder.
    source: Arc<dyn IncludeSource>,
    /// Document to folder mapping.
    folders: Arc<dyn FolderResolver>,
    /// Root of the bundled `<name>.wsd` includes.
    bundled_root: PathBuf,
    /// Resolved blocks per folder.
    cache: IncludeCache,
}

impl Includer {
    /// Create an includer from its collaborators.
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        source: Arc<dyn IncludeSource>,
        folders: Arc<dyn FolderResolver>,
        bundled_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            storage,
            source,
            folders,
            bundled_root: bundled_root.into(),
            cache: IncludeCache::new(),
        }
    }

    /// Create an includer whose specifiers, folders and bundled root come
    /// from a loaded [`Config`].
    #[must_use]
    pub fn from_config(config: Arc<Config>, storage: Arc<dyn Storage>) -> Self {
        let bundled_root = config.bundled_dir().to_path_buf();
        Self::new(
            storage,
            Arc::clone(&config) as Arc<dyn IncludeSource>,
            config,
            bundled_root,
        )
    }

    /// Root of the bundled include library.
    #[must_use]
    pub fn bundled_root(&self) -> &Path {
        &self.bundled_root
    }

    /// Per-folder cache.
    #[must_use]
    pub fn cache(&self) -> &IncludeCache {
        &self.cache
    }

    /// Return the diagram source with the resolved include block spliced in at
    /// its autoinclude marker.
    ///
    /// The content is returned unchanged when no include applies or the
    /// source has no marker.
    #[must_use]
    pub fn add_includes(&self, diagram: &Diagram) -> String {
        let block = self.block_for(diagram);
        if block.is_empty() {
            return diagram.content.clone();
        }
        splice(&diagram.content, &block)
    }

    /// Resolved include block for the diagram's folder, refreshing the cache
    /// entry if the folder's specifiers changed.
    #[must_use]
    pub fn block_for(&self, diagram: &Diagram) -> String {
        let folder = self.folders.owning_folder(diagram.parent_dir());
        let key = folder.clone().unwrap_or_default();

        let specifiers = self.source.include_specifiers(folder.as_deref());
        let fingerprint = SettingsFingerprint::new(&specifiers);

        self.cache.get_or_refresh(&key, &fingerprint, || {
            let paths = self.resolve(&specifiers, folder.as_deref());
            tracing::info!(
                folder = %key.display(),
                specifiers = specifiers.len(),
                includes = paths.len(),
                "Resolved autoincludes"
            );
            format_block(&paths)
        })
    }

    /// Include paths that apply to a folder, in directive order.
    ///
    /// Bypasses the cache.
    #[must_use]
    pub fn resolved_paths(&self, folder_root: Option<&Path>) -> Vec<PathBuf> {
        let specifiers = self.source.include_specifiers(folder_root);
        self.resolve(&specifiers, folder_root)
    }

    fn resolve(&self, specifiers: &[String], folder_root: Option<&Path>) -> Vec<PathBuf> {
        resolve_paths(
            self.storage.as_ref(),
            specifiers,
            folder_root,
            &self.bundled_root,
        )
    }
}
