//! Include specifier resolution.
//!
//! Turns configured specifiers into concrete include paths and formats them as
//! `PlantUML` `!include` directives. Every filesystem failure counts as "not
//! found"; a specifier that resolves to nothing is skipped.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use pinc_storage::Storage;

/// File extension of bundled includes.
const BUNDLED_EXTENSION: &str = "wsd";

/// Resolve specifiers to include paths, in specifier order.
///
/// - Absolute specifiers are kept if they exist.
/// - Relative specifiers are looked up in the workspace folder (when
///   `folder_root` is known) and then in `bundled_root` as `<name>.wsd`. Both
///   lookups contribute; workspace results come first.
///
/// Paths are not deduplicated.
pub fn resolve_paths(
    storage: &dyn Storage,
    specifiers: &[String],
    folder_root: Option<&Path>,
    bundled_root: &Path,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for spec in specifiers {
        if spec.is_empty() {
            continue;
        }

        let path = Path::new(spec);
        if path.is_absolute() {
            if storage.exists(path) {
                paths.push(path.to_path_buf());
            } else {
                tracing::debug!(specifier = %spec, "Absolute include not found");
            }
            continue;
        }

        if let Some(root) = folder_root {
            paths.extend(find_in_workspace(storage, root, spec));
        }
        paths.extend(find_bundled(storage, bundled_root, spec));
    }

    paths
}

/// Workspace-relative lookup: a directory contributes all its entries, a file
/// contributes itself.
fn find_in_workspace(storage: &dyn Storage, root: &Path, spec: &str) -> Vec<PathBuf> {
    let path = root.join(spec);

    if storage.is_dir(&path) {
        return match storage.list_dir(&path) {
            Ok(names) => names.into_iter().map(|name| path.join(name)).collect(),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Failed to list include directory");
                Vec::new()
            }
        };
    }

    if storage.exists(&path) {
        vec![path]
    } else {
        Vec::new()
    }
}

/// Bundled lookup: `<bundled_root>/<spec>.wsd`.
fn find_bundled(storage: &dyn Storage, bundled_root: &Path, spec: &str) -> Option<PathBuf> {
    let path = bundled_root.join(format!("{spec}.{BUNDLED_EXTENSION}"));
    storage.exists(&path).then_some(path)
}

/// Format include paths as directives, each prefixed with a newline.
///
/// An empty list yields an empty string; there is no trailing newline.
#[must_use]
pub fn format_block(paths: &[PathBuf]) -> String {
    paths.iter().fold(String::new(), |mut block, path| {
        let _ = write!(block, "\n!include {}", path.display());
        block
    })
}

#[cfg(test)]
mod tests {
    use pinc_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    const BUNDLED: &str = "/ext/includes";

    fn specs(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_owned()).collect()
    }

    fn paths(values: &[&str]) -> Vec<PathBuf> {
        values.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_absolute_existing() {
        let storage = MockStorage::new().with_file("/abs/x.iuml", "");

        let result = resolve_paths(&storage, &specs(&["/abs/x.iuml"]), None, Path::new(BUNDLED));

        assert_eq!(result, paths(&["/abs/x.iuml"]));
    }

    #[test]
    fn test_absolute_missing() {
        let storage = MockStorage::new();

        let result = resolve_paths(&storage, &specs(&["/abs/x.iuml"]), None, Path::new(BUNDLED));

        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_specifier_skipped() {
        let storage = MockStorage::new().with_file("/ws/styles.iuml", "");

        let result = resolve_paths(
            &storage,
            &specs(&["", "styles.iuml"]),
            Some(Path::new("/ws")),
            Path::new(BUNDLED),
        );

        assert_eq!(result, paths(&["/ws/styles.iuml"]));
    }

    #[test]
    fn test_workspace_file() {
        let storage = MockStorage::new().with_file("/ws/shared/theme.iuml", "");

        let result = resolve_paths(
            &storage,
            &specs(&["shared/theme.iuml"]),
            Some(Path::new("/ws")),
            Path::new(BUNDLED),
        );

        assert_eq!(result, paths(&["/ws/shared/theme.iuml"]));
    }

    #[test]
    fn test_workspace_directory_expanded_in_listing_order() {
        let storage = MockStorage::new()
            .with_file("/ws/styles/a.iuml", "")
            .with_file("/ws/styles/b.iuml", "");

        let result = resolve_paths(
            &storage,
            &specs(&["styles"]),
            Some(Path::new("/ws")),
            Path::new(BUNDLED),
        );

        assert_eq!(result, paths(&["/ws/styles/a.iuml", "/ws/styles/b.iuml"]));
    }

    #[test]
    fn test_workspace_empty_directory() {
        let storage = MockStorage::new().with_dir("/ws/styles");

        let result = resolve_paths(
            &storage,
            &specs(&["styles"]),
            Some(Path::new("/ws")),
            Path::new(BUNDLED),
        );

        assert!(result.is_empty());
    }

    #[test]
    fn test_workspace_unreadable_directory_contributes_nothing() {
        let storage = MockStorage::new()
            .with_denied_dir("/ws/styles")
            .with_file("/ws/theme.iuml", "");

        let result = resolve_paths(
            &storage,
            &specs(&["styles", "theme.iuml"]),
            Some(Path::new("/ws")),
            Path::new(BUNDLED),
        );

        assert_eq!(result, paths(&["/ws/theme.iuml"]));
    }

    #[test]
    fn test_workspace_skipped_without_folder() {
        let storage = MockStorage::new().with_file("/ws/styles.iuml", "");

        let result = resolve_paths(&storage, &specs(&["styles.iuml"]), None, Path::new(BUNDLED));

        assert!(result.is_empty());
    }

    #[test]
    fn test_bundled_fallback() {
        let storage = MockStorage::new().with_file("/ext/includes/foo.wsd", "");

        let result = resolve_paths(
            &storage,
            &specs(&["foo"]),
            Some(Path::new("/ws")),
            Path::new(BUNDLED),
        );

        assert_eq!(result, paths(&["/ext/includes/foo.wsd"]));
    }

    #[test]
    fn test_bundled_without_folder() {
        let storage = MockStorage::new().with_file("/ext/includes/foo.wsd", "");

        let result = resolve_paths(&storage, &specs(&["foo"]), None, Path::new(BUNDLED));

        assert_eq!(result, paths(&["/ext/includes/foo.wsd"]));
    }

    #[test]
    fn test_workspace_and_bundled_both_contribute() {
        let storage = MockStorage::new()
            .with_file("/ws/foo", "")
            .with_file("/ext/includes/foo.wsd", "");

        let result = resolve_paths(
            &storage,
            &specs(&["foo"]),
            Some(Path::new("/ws")),
            Path::new(BUNDLED),
        );

        assert_eq!(result, paths(&["/ws/foo", "/ext/includes/foo.wsd"]));
    }

    #[test]
    fn test_specifier_order_preserved_without_dedup() {
        let storage = MockStorage::new()
            .with_file("/abs/x.iuml", "")
            .with_file("/ext/includes/foo.wsd", "");

        let result = resolve_paths(
            &storage,
            &specs(&["foo", "/abs/x.iuml", "foo"]),
            None,
            Path::new(BUNDLED),
        );

        assert_eq!(
            result,
            paths(&[
                "/ext/includes/foo.wsd",
                "/abs/x.iuml",
                "/ext/includes/foo.wsd"
            ])
        );
    }

    #[test]
    fn test_format_block() {
        let block = format_block(&paths(&["/ext/includes/foo.wsd", "/abs/x.iuml"]));

        assert_eq!(block, "\n!include /ext/includes/foo.wsd\n!include /abs/x.iuml");
    }

    #[test]
    fn test_format_block_empty() {
        assert_eq!(format_block(&[]), "");
    }
}
