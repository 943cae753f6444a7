//! Corpus discovery and in-place rewrite passes for mdtidy.
//!
//! Walks a content directory for Markdown/MDX documents and applies the pure
//! transformations from `mdtidy-mdx`, writing results back to disk.

mod error;
pub mod report;
pub mod runner;
pub mod walker;

pub use error::CorpusError;
pub use report::{scan_code_langs, DocumentLangs, LangReport};
pub use runner::{FenceRepair, FrontmatterSynthesis, Pass, PassReport, PassRunner};
pub use walker::{discover, is_document, Document};
