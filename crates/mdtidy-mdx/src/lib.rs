//! Frontmatter repair and code fence language normalization.
//!
//! Every transformation here is a pure function over document text (or a parsed
//! tree). Reading and writing files is left to the caller.

pub mod codeblock;
pub mod frontmatter;
pub mod parser;

pub use codeblock::{normalize_info, normalize_lang, normalize_tree, NormalizeCodeLang};
pub use frontmatter::{
    classify, repair_missing_opening, synthesize, title_from_stem, FileIdentity, FrontmatterShape,
    SCAN_WINDOW,
};
pub use parser::{lang_changes, parse_document, Dialect, LangChange, ParseError};
