//! Minimal frontmatter generation for documents that have none.

use std::sync::LazyLock;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDate};
use regex::Regex;

use super::{starts_with_delimiter, DELIMITER};

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]+").expect("Invalid separator regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// What a generated frontmatter block is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    /// File name without its extension
    pub stem: String,

    /// Last-modified date in the local time zone
    pub modified: NaiveDate,
}

impl FileIdentity {
    /// Build an identity from a file stem and its modification time.
    pub fn new(stem: impl Into<String>, modified: SystemTime) -> Self {
        let local: DateTime<Local> = modified.into();
        Self {
            stem: stem.into(),
            modified: local.date_naive(),
        }
    }
}

/// Prepend a minimal frontmatter block to a document that has none.
///
/// Returns `None` if the document already opens with a delimiter line. The
/// original text is appended unchanged after one blank line.
pub fn synthesize(text: &str, identity: &FileIdentity) -> Option<String> {
    if starts_with_delimiter(text) {
        return None;
    }

    let title = title_from_stem(&identity.stem);
    let publish_date = identity.modified.format("%Y-%m-%d");

    let block = [
        DELIMITER.to_string(),
        format!("title: \"{}\"", escape_quoted(&title)),
        "description: \"\"".to_string(),
        format!("publishDate: \"{}\"", publish_date),
        "tags: []".to_string(),
        "draft: false".to_string(),
        DELIMITER.to_string(),
    ]
    .join("\n");

    Some(format!("{block}\n\n{text}"))
}

/// Derive a page title from a file stem.
///
/// Runs of `-` and `_` become single spaces, whitespace is collapsed and
/// trimmed, and only the first character is uppercased.
pub fn title_from_stem(stem: &str) -> String {
    let spaced = SEPARATOR_RE.replace_all(stem, " ");
    let collapsed = WHITESPACE_RE.replace_all(&spaced, " ");
    let trimmed = collapsed.trim();

    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Escape a value for a double-quoted YAML scalar.
fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct GeneratedFrontmatter {
        title: String,
        description: String,
        publish_date: String,
        tags: Vec<String>,
        draft: bool,
    }

    fn identity(stem: &str) -> FileIdentity {
        FileIdentity {
            stem: stem.to_string(),
            modified: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        }
    }

    #[test]
    fn derives_title_from_stem() {
        assert_eq!(title_from_stem("my-cool_post"), "My cool post");
        assert_eq!(title_from_stem("hello"), "Hello");
        assert_eq!(title_from_stem("--lots__of---separators--"), "Lots of separators");
        assert_eq!(title_from_stem("already Spaced  out"), "Already Spaced out");
        assert_eq!(title_from_stem("2024-01-01-new-year"), "2024 01 01 new year");
        assert_eq!(title_from_stem("élan"), "Élan");
        assert_eq!(title_from_stem("-_-"), "");
    }

    #[test]
    fn generates_exact_block() {
        let fixed = synthesize("# Body\n", &identity("my-cool_post")).unwrap();

        assert_eq!(
            fixed,
            "---\n\
             title: \"My cool post\"\n\
             description: \"\"\n\
             publishDate: \"2024-03-07\"\n\
             tags: []\n\
             draft: false\n\
             ---\n\
             \n\
             # Body\n"
        );
    }

    #[test]
    fn generated_block_is_valid_yaml() {
        let fixed = synthesize("Body", &identity("say-\"hi\"")).unwrap();

        let yaml = fixed
            .strip_prefix("---\n")
            .and_then(|rest| rest.split("\n---\n").next())
            .unwrap();
        let fm: GeneratedFrontmatter = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(fm.title, "Say \"hi\"");
        assert_eq!(fm.description, "");
        assert_eq!(fm.publish_date, "2024-03-07");
        assert!(fm.tags.is_empty());
        assert!(!fm.draft);
    }

    #[test]
    fn body_is_appended_unchanged() {
        let body = "\r\nline one\r\n\r\n---\r\n";

        let fixed = synthesize(body, &identity("post")).unwrap();

        assert!(fixed.ends_with(&format!("---\n\n{body}")));
    }

    #[test]
    fn skips_documents_with_frontmatter() {
        let source = "---\ntitle: Existing\n---\n\nBody\n";

        assert_eq!(synthesize(source, &identity("post")), None);
    }

    #[test]
    fn synthesis_is_idempotent() {
        let once = synthesize("Body\n", &identity("post")).unwrap();

        assert_eq!(synthesize(&once, &identity("post")), None);
    }

    #[test]
    fn identity_uses_local_date() {
        let now = SystemTime::now();
        let expected = DateTime::<Local>::from(now).date_naive();

        let id = FileIdentity::new("post", now);

        assert_eq!(id.stem, "post");
        assert_eq!(id.modified, expected);
    }
}
