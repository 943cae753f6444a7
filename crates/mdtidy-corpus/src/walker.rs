//! Corpus discovery.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::CorpusError;

/// File extensions treated as documents, matched case-insensitively.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// A document loaded from disk.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path the document was read from
    pub path: PathBuf,

    /// Full file contents
    pub raw_text: String,

    /// Last modification time
    pub modified_at: SystemTime,
}

impl Document {
    /// Read a document and its modification time.
    pub fn read(path: &Path) -> Result<Self, CorpusError> {
        let raw_text = fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let modified_at = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|source| CorpusError::Metadata {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            raw_text,
            modified_at,
        })
    }

    /// File name without extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Replace the document's contents on disk.
    pub fn write(&self, text: &str) -> Result<(), CorpusError> {
        fs::write(&self.path, text).map_err(|source| CorpusError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Check whether a path has a document extension.
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|doc_ext| ext.eq_ignore_ascii_case(doc_ext))
        })
}

/// Find all documents under `root`, recursively.
///
/// Paths come back sorted by file name within each directory so runs are
/// reproducible. A missing root is reported before anything is read.
/// Symlinked documents are included, symlinked directories are not entered.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    if !root.is_dir() {
        return Err(CorpusError::NotFound(root.to_path_buf()));
    }

    let mut documents = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_dir() || !is_document(path) {
            continue;
        }

        documents.push(path.to_path_buf());
    }

    tracing::debug!("Discovered {} documents under {}", documents.len(), root.display());

    Ok(documents)
}
