//! Per-folder include cache.
//!
//! Provides [`IncludeCache`], which memoizes the resolved include block of each
//! workspace folder, and [`SettingsFingerprint`], the validity key of an entry.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Snapshot of a folder's include specifiers, sorted lexicographically.
///
/// Two specifier lists with the same elements in any order have equal
/// fingerprints. Comparison is structural, so specifiers containing commas
/// cannot collide the way a joined string would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsFingerprint(Vec<String>);

impl SettingsFingerprint {
    /// Compute the fingerprint of a specifier list.
    #[must_use]
    pub fn new(specifiers: &[String]) -> Self {
        let mut sorted = specifiers.to_vec();
        sorted.sort();
        Self(sorted)
    }

    /// Sorted specifiers.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Comma-joined form, as shown in logs.
impl fmt::Display for SettingsFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// Resolved includes of one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeCacheEntry {
    /// Specifier list this entry was computed from.
    pub fingerprint: SettingsFingerprint,
    /// `"\n!include <path>"` directives, or empty if nothing applies.
    pub block: String,
}

/// Memoized include blocks keyed by folder root.
///
/// The empty path is the key for documents without a workspace folder.
/// Entries live as long as the cache and are replaced whole when their
/// fingerprint goes stale.
#[derive(Debug, Default)]
pub struct IncludeCache {
    entries: Mutex<HashMap<PathBuf, IncludeCacheEntry>>,
}

impl IncludeCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached block for `folder`, recomputing it first if there is
    /// no entry or the entry's fingerprint differs from `fingerprint`.
    ///
    /// The lookup, `compute` and the store run under one lock, so concurrent
    /// callers never recompute the same folder twice.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned. `compute` runs with the lock
    /// held, so a panic inside it poisons the cache for every later call.
    pub fn get_or_refresh(
        &self,
        folder: &Path,
        fingerprint: &SettingsFingerprint,
        compute: impl FnOnce() -> String,
    ) -> String {
        let mut entries = self.entries.lock().unwrap();

        if let Some(entry) = entries.get(folder)
            && entry.fingerprint == *fingerprint
        {
            tracing::debug!(folder = %folder.display(), "Include cache hit");
            return entry.block.clone();
        }

        let block = compute();
        tracing::debug!(
            folder = %folder.display(),
            fingerprint = %fingerprint,
            "Include cache refreshed"
        );
        entries.insert(
            folder.to_path_buf(),
            IncludeCacheEntry {
                fingerprint: fingerprint.clone(),
                block: block.clone(),
            },
        );
        block
    }

    /// Cached entry for `folder`, regardless of freshness.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn get(&self, folder: &Path) -> Option<IncludeCacheEntry> {
        self.entries.lock().unwrap().get(folder).cloned()
    }

    /// Number of cached folders.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether no folder has been cached yet.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Drop every entry.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}
