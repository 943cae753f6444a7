//! Read-only code fence language report.

use std::path::{Path, PathBuf};

use mdtidy_mdx::{lang_changes, Dialect, LangChange};

use crate::walker::{discover, Document};
use crate::CorpusError;

/// Non-canonical code fence tags found in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLangs {
    pub path: PathBuf,
    pub changes: Vec<LangChange>,
}

/// Result of scanning a corpus for code fence tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangReport {
    /// Number of documents examined
    pub scanned: usize,

    /// Documents with at least one tag to normalize
    pub documents: Vec<DocumentLangs>,

    /// Documents the Markdown parser rejected
    pub unparsed: Vec<PathBuf>,
}

impl LangReport {
    /// Total number of tags that would change.
    pub fn total_changes(&self) -> usize {
        self.documents.iter().map(|d| d.changes.len()).sum()
    }
}

/// Scan every document under `root` and list code fence tags that are not
/// canonical. Nothing is written.
///
/// Documents that fail to parse are skipped with a warning.
pub fn scan_code_langs(root: &Path) -> Result<LangReport, CorpusError> {
    let paths = discover(root)?;

    let mut report = LangReport {
        scanned: paths.len(),
        ..Default::default()
    };

    for path in paths {
        let doc = Document::read(&path)?;
        let dialect = path
            .extension()
            .and_then(|e| e.to_str())
            .map(Dialect::from_extension)
            .unwrap_or_default();

        match lang_changes(&doc.raw_text, dialect) {
            Ok(changes) if changes.is_empty() => {}
            Ok(changes) => report.documents.push(DocumentLangs { path, changes }),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                report.unparsed.push(path);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reports_tags_without_writing() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        let source = "# Post\n\n```YML\na: 1\n```\n\n```yaml\nb: 2\n```\n";
        fs::write(root.join("post.md"), source).unwrap();
        fs::write(root.join("clean.md"), "```bash\nls\n```\n").unwrap();

        let report = scan_code_langs(root).unwrap();

        assert_eq!(report.scanned, 2);
        assert_eq!(report.total_changes(), 1);
        assert_eq!(report.documents[0].path, root.join("post.md"));
        assert_eq!(report.documents[0].changes[0].to, "yaml");
        assert_eq!(fs::read_to_string(root.join("post.md")).unwrap(), source);
    }

    #[test]
    fn unparseable_mdx_is_skipped() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("broken.mdx"), "<Button>\n\nunclosed\n").unwrap();

        let report = scan_code_langs(temp.path()).unwrap();

        assert_eq!(report.scanned, 1);
        assert_eq!(report.unparsed, vec![temp.path().join("broken.mdx")]);
    }
}
