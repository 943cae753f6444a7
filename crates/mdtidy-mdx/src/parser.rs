//! Markdown/MDX parsing for code fence reports.

use markdown::mdast::Node;

use crate::codeblock::normalize_lang;

/// Source dialect of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// CommonMark with GFM extensions
    #[default]
    Markdown,
    /// MDX (JSX, ESM and expressions on top of Markdown)
    Mdx,
}

impl Dialect {
    /// Pick a dialect from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("mdx") {
            Self::Mdx
        } else {
            Self::Markdown
        }
    }

    fn parse_options(self) -> markdown::ParseOptions {
        let mut options = match self {
            Self::Markdown => markdown::ParseOptions::gfm(),
            Self::Mdx => markdown::ParseOptions::mdx(),
        };
        options.constructs.frontmatter = true;
        options
    }
}

/// A code fence whose language tag is not in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangChange {
    /// Line of the opening fence (1-indexed), when the parser tracked it
    pub line: Option<usize>,
    /// Tag as written
    pub from: String,
    /// Canonical tag
    pub to: String,
}

/// Errors that can occur when parsing a document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Markdown parse error: {0}")]
    Markdown(String),
}

/// Parse a document into an mdast tree with frontmatter support enabled.
pub fn parse_document(source: &str, dialect: Dialect) -> Result<Node, ParseError> {
    markdown::to_mdast(source, &dialect.parse_options())
        .map_err(|e| ParseError::Markdown(e.to_string()))
}

/// List code fences whose language tag would change under normalization.
pub fn lang_changes(source: &str, dialect: Dialect) -> Result<Vec<LangChange>, ParseError> {
    let tree = parse_document(source, dialect)?;

    let mut changes = Vec::new();
    collect_changes(&tree, &mut changes);
    Ok(changes)
}

fn collect_changes(node: &Node, changes: &mut Vec<LangChange>) {
    if let Node::Code(code) = node {
        if let Some(lang) = code.lang.as_deref() {
            if let Some(normalized) = normalize_lang(lang) {
                if normalized != lang {
                    changes.push(LangChange {
                        line: code.position.as_ref().map(|p| p.start.line),
                        from: lang.to_string(),
                        to: normalized,
                    });
                }
            }
        }
    }

    if let Some(children) = node.children() {
        for child in children {
            collect_changes(child, changes);
        }
    }
}
