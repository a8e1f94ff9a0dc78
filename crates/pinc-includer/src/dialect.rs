//! Detection of `PlantUML` dialects that cannot take `!include` directives.
//!
//! Salt wireframes, the single-command "easter egg" diagrams (`license`,
//! `version`, `sudoku`, ...) and `xearth(...)` renders break when arbitrary
//! includes are spliced into them. [`cannot_include`] recognizes them from the
//! source text alone. The includer does not call it; callers decide.

use std::sync::LazyLock;

use regex::Regex;

static SALT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*salt\s*$").unwrap());

static START_SALT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*@startsalt").unwrap());

static SPECIAL_COMMAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(license|version|sudoku|listfonts|listopeniconic)").unwrap()
});

static XEARTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*xearth\(\d+,\d+\)\s*$").unwrap());

fn is_salt(line: &str) -> bool {
    SALT_PATTERN.is_match(line) || START_SALT_PATTERN.is_match(line)
}

/// Whether the diagram source is a dialect that cannot receive includes.
///
/// Looks at the first line and at the first non-blank line after it (the
/// "body" line, usually right after `@startuml`):
/// - either is `salt` or starts with `@startsalt`
/// - the source has exactly three lines and the body line starts with a
///   special command (`license`, `version`, `sudoku`, `listfonts`,
///   `listopeniconic`)
/// - the body line is `xearth(<int>,<int>)`
#[must_use]
pub fn cannot_include(content: &str) -> bool {
    let lines: Vec<&str> = content.split('\n').collect();
    let first = lines.first().copied().unwrap_or_default();
    let body = lines
        .iter()
        .skip(1)
        .find(|line| !line.trim().is_empty())
        .copied()
        .unwrap_or_default();

    is_salt(first)
        || is_salt(body)
        || (lines.len() == 3 && SPECIAL_COMMAND_PATTERN.is_match(body))
        || XEARTH_PATTERN.is_match(body)
}
