//! In-place rewrite passes over a corpus.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use mdtidy_mdx::{repair_missing_opening, synthesize, FileIdentity};

use crate::walker::{discover, Document};
use crate::CorpusError;

/// A document rewrite.
///
/// Implementations decide from the document alone and never touch the
/// filesystem; the runner does the reading and writing.
pub trait Pass: Sync {
    /// Log label for a rewritten document.
    fn action(&self) -> &'static str;

    /// Return the new text, or `None` to leave the document alone.
    fn rewrite(&self, doc: &Document) -> Option<String>;
}

/// Inserts the opening `---` for frontmatter that only has a closing one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FenceRepair;

impl Pass for FenceRepair {
    fn action(&self) -> &'static str {
        "Inserted opening frontmatter fence"
    }

    fn rewrite(&self, doc: &Document) -> Option<String> {
        repair_missing_opening(&doc.raw_text)
    }
}

/// Prepends generated frontmatter to documents that have none.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontmatterSynthesis;

impl Pass for FrontmatterSynthesis {
    fn action(&self) -> &'static str {
        "Added frontmatter"
    }

    fn rewrite(&self, doc: &Document) -> Option<String> {
        let identity = FileIdentity::new(doc.stem(), doc.modified_at);
        synthesize(&doc.raw_text, &identity)
    }
}

/// Outcome of running a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Number of documents examined
    pub scanned: usize,

    /// Documents that were (or, in a dry run, would be) rewritten
    pub changed: Vec<PathBuf>,

    /// Total time in milliseconds
    pub duration_ms: u64,
}

impl PassReport {
    /// Number of rewritten documents.
    pub fn updated(&self) -> usize {
        self.changed.len()
    }
}

/// Runs a [`Pass`] over every document under a root directory.
#[derive(Debug, Clone)]
pub struct PassRunner {
    root: PathBuf,
    dry_run: bool,
}

impl PassRunner {
    /// Create a runner for the given content root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Classify documents without writing anything back.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run a pass.
    ///
    /// Documents are processed in parallel, so a failing document does not stop
    /// the others from being rewritten. Results are then checked in discovery
    /// order and the first failure is returned; the documents that were
    /// rewritten anyway are logged before it.
    pub fn run(&self, pass: &dyn Pass) -> Result<PassReport, CorpusError> {
        let start = Instant::now();

        let paths = discover(&self.root)?;
        let cwd = env::current_dir().ok();

        let results: Vec<Result<bool, CorpusError>> = paths
            .par_iter()
            .map(|path| self.process(path, pass, cwd.as_deref()))
            .collect();

        let mut report = PassReport {
            scanned: paths.len(),
            ..Default::default()
        };
        let mut first_error = None;

        for (path, result) in paths.into_iter().zip(results) {
            match result {
                Ok(true) => report.changed.push(path),
                Ok(false) => {}
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            if !report.changed.is_empty() && !self.dry_run {
                tracing::warn!(
                    "Run failed after rewriting {} documents",
                    report.changed.len()
                );
            }
            return Err(e);
        }

        report.duration_ms = start.elapsed().as_millis() as u64;

        Ok(report)
    }

    fn process(
        &self,
        path: &Path,
        pass: &dyn Pass,
        cwd: Option<&Path>,
    ) -> Result<bool, CorpusError> {
        let doc = Document::read(path)?;

        let Some(text) = pass.rewrite(&doc) else {
            tracing::debug!("Unchanged: {}", display_path(path, cwd).display());
            return Ok(false);
        };

        if !self.dry_run {
            doc.write(&text)?;
        }

        tracing::info!("{}: {}", self.label(pass), display_path(path, cwd).display());

        Ok(true)
    }

    /// Log label for a document the pass rewrites.
    fn label(&self, pass: &dyn Pass) -> String {
        if self.dry_run {
            format!("[dry run] {}", pass.action())
        } else {
            pass.action().to_string()
        }
    }
}

fn display_path<'a>(path: &'a Path, cwd: Option<&Path>) -> &'a Path {
    cwd.and_then(|cwd| path.strip_prefix(cwd).ok())
        .unwrap_or(path)
}
