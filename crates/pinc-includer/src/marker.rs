//! Autoinclude marker detection and splicing.
//!
//! A marker is a line holding only the `autoinclude` token, optionally written
//! as a `PlantUML` comment (`'autoinclude`), in any case and with surrounding
//! whitespace. It must have a newline on both sides, so the first line and an
//! unterminated last line never count.
//!
//! The bare `autoinclude` form is an extension: the historical marker always
//! carried the comment quote, and documents using it match here unchanged.

use std::ops::Range;

/// Marker token.
const MARKER: &str = "autoinclude";

/// Whether a single line (without its newline) is a marker.
#[must_use]
pub fn is_marker_line(line: &str) -> bool {
    let token = line.trim();
    let token = token.strip_prefix('\'').map_or(token, str::trim_start);
    token.eq_ignore_ascii_case(MARKER)
}

/// Byte range of the first marker, from the newline before it through the
/// newline after it.
#[must_use]
pub fn find_marker(content: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    for (index, line) in content.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += line.len();

        let Some(body) = line.strip_suffix('\n') else {
            break;
        };
        if index > 0 && is_marker_line(body) {
            return Some(start - 1..offset);
        }
    }
    None
}

/// Replace the first marker line with `block`.
///
/// `block` is expected in directive form (`"\n!include <path>"...`); a newline
/// is appended so the line after the marker keeps its own line. Content without
/// a marker is returned unchanged.
#[must_use]
pub fn splice(content: &str, block: &str) -> String {
    let Some(range) = find_marker(content) else {
        return content.to_owned();
    };

    let mut result = String::with_capacity(content.len() + block.len());
    result.push_str(&content[..range.start]);
    result.push_str(block);
    result.push('\n');
    result.push_str(&content[range.end..]);
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BLOCK: &str = "\n!include /a/b.iuml";

    #[test]
    fn test_is_marker_line() {
        assert!(is_marker_line("'autoinclude"));
        assert!(is_marker_line("  ' AutoInclude  "));
        assert!(is_marker_line("autoinclude"));
        assert!(is_marker_line("'autoinclude\r"));
        assert!(!is_marker_line("' autoinclude me"));
        assert!(!is_marker_line("''autoinclude"));
        assert!(!is_marker_line("!autoinclude"));
        assert!(!is_marker_line(""));
    }

    #[test]
    fn test_splice_replaces_marker_line() {
        let result = splice("start\n'autoinclude\nend", BLOCK);

        assert_eq!(result, "start\n!include /a/b.iuml\nend");
    }

    #[test]
    fn test_splice_only_first_marker() {
        let result = splice("start\n'autoinclude\nmiddle\n'autoinclude\nend", BLOCK);

        assert_eq!(
            result,
            "start\n!include /a/b.iuml\nmiddle\n'autoinclude\nend"
        );
    }

    #[test]
    fn test_splice_multiple_directives() {
        let result = splice(
            "@startuml\n  'AUTOINCLUDE  \nA -> B\n@enduml",
            "\n!include /ext/foo.wsd\n!include /abs/x.iuml",
        );

        assert_eq!(
            result,
            "@startuml\n!include /ext/foo.wsd\n!include /abs/x.iuml\nA -> B\n@enduml"
        );
    }

    #[test]
    fn test_splice_no_marker_unchanged() {
        let content = "@startuml\nA -> B\n@enduml";

        assert_eq!(splice(content, BLOCK), content);
    }

    #[test]
    fn test_marker_on_first_line_ignored() {
        let content = "'autoinclude\nA -> B";

        assert_eq!(find_marker(content), None);
        assert_eq!(splice(content, BLOCK), content);
    }

    #[test]
    fn test_marker_on_last_line_ignored() {
        let content = "@startuml\n'autoinclude";

        assert_eq!(find_marker(content), None);
    }

    #[test]
    fn test_marker_before_trailing_newline() {
        let result = splice("@startuml\n'autoinclude\n", BLOCK);

        assert_eq!(result, "@startuml\n!include /a/b.iuml\n");
    }

    #[test]
    fn test_marker_with_crlf() {
        let result = splice("start\r\n'autoinclude\r\nend", BLOCK);

        assert_eq!(result, "start\r\n!include /a/b.iuml\nend");
    }

    #[test]
    fn test_find_marker_range() {
        assert_eq!(find_marker("ab\n'autoinclude\ncd"), Some(2..16));
    }
}
