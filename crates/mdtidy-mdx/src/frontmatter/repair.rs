//! Opening delimiter repair for frontmatter blocks.

use super::{classify, split_lines, FrontmatterShape, DELIMITER};

/// Number of lines from the top of a document searched for a closing delimiter.
///
/// A `---` further down is treated as a horizontal rule in the body, not as a
/// frontmatter fence, and the document is left alone.
pub const SCAN_WINDOW: usize = 100;

/// Insert a missing opening delimiter.
///
/// Returns the repaired text when the document starts with `key: value` lines
/// followed by a closing `---` within [`SCAN_WINDOW`] lines, and `None` for
/// anything else, including documents that already open with `---`.
///
/// Lines are rejoined with `\n`, so CRLF input comes back LF-terminated.
pub fn repair_missing_opening(text: &str) -> Option<String> {
    let FrontmatterShape::MissingOpening { closing_line } = classify(text) else {
        return None;
    };

    tracing::trace!("Closing delimiter found at line {}", closing_line);

    let lines = split_lines(text);
    let mut fixed = String::with_capacity(text.len() + DELIMITER.len() + 1);
    fixed.push_str(DELIMITER);
    fixed.push('\n');
    fixed.push_str(&lines.join("\n"));

    Some(fixed)
}
