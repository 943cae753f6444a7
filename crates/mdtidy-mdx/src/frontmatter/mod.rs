//! Frontmatter detection and repair.
//!
//! A frontmatter block is a run of `key: value` lines at the top of a document,
//! opened and closed by a line that is exactly `---`. Both passes in this module
//! only look at the first line to decide whether a document already has an
//! opening delimiter, which keeps them idempotent and independent of each other.

use std::sync::LazyLock;

use regex::Regex;

pub mod repair;
pub mod synth;

pub use repair::{repair_missing_opening, SCAN_WINDOW};
pub use synth::{synthesize, title_from_stem, FileIdentity};

/// The delimiter line that opens and closes a frontmatter block.
pub const DELIMITER: &str = "---";

static OPENING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s*\n").expect("Invalid opening delimiter regex"));

static DELIMITER_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s*$").expect("Invalid delimiter line regex"));

static KEY_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-_a-zA-Z0-9]+\s*:\s*").expect("Invalid key line regex"));

/// Shape of the frontmatter region at the top of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterShape {
    /// First line is an opening delimiter.
    Complete,

    /// Starts with `key: value` lines and has a closing delimiter within
    /// [`SCAN_WINDOW`] lines, but no opening delimiter.
    MissingOpening {
        /// 0-indexed line of the orphaned closing delimiter
        closing_line: usize,
    },

    /// No usable frontmatter markers.
    Absent,
}

/// Classify the frontmatter region of a document.
pub fn classify(text: &str) -> FrontmatterShape {
    if starts_with_delimiter(text) {
        return FrontmatterShape::Complete;
    }

    let lines = split_lines(text);
    if !first_content_line_is_key(&lines) {
        return FrontmatterShape::Absent;
    }

    match find_closing_delimiter(&lines) {
        Some(closing_line) => FrontmatterShape::MissingOpening { closing_line },
        None => FrontmatterShape::Absent,
    }
}

/// Check whether the document's first line is an opening delimiter.
///
/// Trailing whitespace after `---` is tolerated; the line must be terminated
/// by a newline, so a document consisting of just `---` does not count.
pub fn starts_with_delimiter(text: &str) -> bool {
    OPENING_RE.is_match(text)
}

/// Split text into lines on `\n` or `\r\n`.
///
/// Unlike [`str::lines`], a trailing newline yields a final empty line, so
/// joining the result with `\n` reproduces LF-terminated input exactly. A `\r`
/// with no `\n` after it is content and stays on its line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let terminated = lines.len() - 1;
    for line in &mut lines[..terminated] {
        let segment: &str = *line;
        *line = segment.strip_suffix('\r').unwrap_or(segment);
    }
    lines
}

/// Check whether the first non-blank line looks like `key:` or `key: value`.
pub(crate) fn first_content_line_is_key(lines: &[&str]) -> bool {
    let first = lines
        .iter()
        .find(|line| !line.trim().is_empty())
        .copied()
        .unwrap_or("");

    KEY_LINE_RE.is_match(first)
}

/// Find the first delimiter line within the scan window.
pub(crate) fn find_closing_delimiter(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .take(SCAN_WINDOW)
        .position(|line| DELIMITER_LINE_RE.is_match(line))
}
