//! Code fence language normalization.
//!
//! Syntax highlighters expect short lowercase language ids (`js`, `bash`,
//! `yaml`). Documents in the wild use `JavaScript`, `shell`, `YML` and so on.
//! The functions here rewrite those tags in place, either on a parsed mdast
//! tree or on a `pulldown-cmark` event stream.

use std::collections::HashMap;
use std::sync::LazyLock;

use markdown::mdast::{Code, Node};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag};

/// Lowercase source id to canonical id.
static ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("javascript", "js"),
        ("typescript", "ts"),
        ("jsx", "jsx"),
        ("tsx", "tsx"),
        ("shell", "bash"),
        ("bash", "bash"),
        ("sh", "bash"),
        ("zsh", "bash"),
        ("console", "bash"),
        ("css", "css"),
        ("scss", "scss"),
        ("sass", "sass"),
        ("html", "html"),
        ("json", "json"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("txt", "txt"),
    ])
});

/// Look up the canonical id for an already-lowercased language id.
pub fn canonical_alias(lower: &str) -> Option<&'static str> {
    ALIASES.get(lower).copied()
}

/// Normalize a raw language tag.
///
/// Returns `None` for a blank tag. Otherwise the trimmed, lowercased tag is
/// mapped through the alias table; unknown languages pass through lowercased.
pub fn normalize_lang(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    match canonical_alias(&lower) {
        Some(canonical) => Some(canonical.to_string()),
        None => Some(lower),
    }
}

/// Normalize the `lang` of every code node in a tree.
///
/// Nodes without a tag, or with a blank one, are left as they are.
pub fn normalize_tree(root: &mut Node) {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        match node {
            Node::Code(code) => normalize_code(code),
            other => {
                if let Some(children) = other.children_mut() {
                    stack.extend(children.iter_mut());
                }
            }
        }
    }
}

fn normalize_code(code: &mut Code) {
    let Some(lang) = code.lang.as_deref() else {
        return;
    };

    if let Some(normalized) = normalize_lang(lang) {
        if normalized != lang {
            tracing::debug!("Normalized code lang {:?} -> {:?}", lang, normalized);
        }
        code.lang = Some(normalized);
    }
}

/// Normalize the language word of a fenced code block info string.
///
/// Only the first word is touched; meta after it is kept verbatim, so
/// `JavaScript title="a.js"` becomes `js title="a.js"`.
pub fn normalize_info(info: &str) -> String {
    let trimmed = info.trim_start();
    let (lang, rest) = match trimmed.find(char::is_whitespace) {
        Some(end) => trimmed.split_at(end),
        None => (trimmed, ""),
    };

    match normalize_lang(lang) {
        Some(normalized) => format!("{normalized}{rest}"),
        None => info.to_string(),
    }
}

/// Event stream adapter that normalizes fenced code block languages.
///
/// Wraps a `pulldown_cmark::Parser` (or any event iterator) for hosts that
/// render from events instead of a tree.
pub struct NormalizeCodeLang<I> {
    inner: I,
}

impl<I> NormalizeCodeLang<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<'a, I> Iterator for NormalizeCodeLang<I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(normalize_event)
    }
}

fn normalize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
            let normalized = normalize_info(&info);
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(CowStr::from(
                normalized,
            ))))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown::mdast::{Paragraph, Root, Text};
    use pretty_assertions::assert_eq;
    use pulldown_cmark::Parser;

    fn code(lang: Option<&str>) -> Node {
        Node::Code(Code {
            value: "x".to_string(),
            position: None,
            lang: lang.map(str::to_string),
            meta: None,
        })
    }

    fn lang_of(node: &Node) -> Option<&str> {
        match node {
            Node::Code(code) => code.lang.as_deref(),
            _ => panic!("expected code node"),
        }
    }

    #[test]
    fn normalizes_aliases_case_insensitively() {
        assert_eq!(normalize_lang("JavaScript").as_deref(), Some("js"));
        assert_eq!(normalize_lang("YML").as_deref(), Some("yaml"));
        assert_eq!(normalize_lang(" TypeScript ").as_deref(), Some("ts"));
        assert_eq!(normalize_lang("console").as_deref(), Some("bash"));
        assert_eq!(normalize_lang("zsh").as_deref(), Some("bash"));
    }

    #[test]
    fn unknown_languages_pass_through_lowercased() {
        assert_eq!(normalize_lang("Elixir").as_deref(), Some("elixir"));
        assert_eq!(normalize_lang("rust").as_deref(), Some("rust"));
    }

    #[test]
    fn blank_tags_are_ignored() {
        assert_eq!(normalize_lang(""), None);
        assert_eq!(normalize_lang("   "), None);
    }

    #[test]
    fn normalizes_nested_code_nodes() {
        let mut tree = Node::Root(Root {
            children: vec![
                code(Some("JavaScript")),
                Node::Paragraph(Paragraph {
                    children: vec![Node::Text(Text {
                        value: "JavaScript".to_string(),
                        position: None,
                    })],
                    position: None,
                }),
                Node::Blockquote(markdown::mdast::Blockquote {
                    children: vec![code(Some("YML")), code(Some("Elixir"))],
                    position: None,
                }),
                code(None),
                code(Some("  ")),
            ],
            position: None,
        });

        normalize_tree(&mut tree);

        let children = tree.children().unwrap();
        assert_eq!(lang_of(&children[0]), Some("js"));
        assert!(matches!(&children[1], Node::Paragraph(p) if p.children.len() == 1));
        let quoted = children[2].children().unwrap();
        assert_eq!(lang_of(&quoted[0]), Some("yaml"));
        assert_eq!(lang_of(&quoted[1]), Some("elixir"));
        assert_eq!(lang_of(&children[3]), None);
        assert_eq!(lang_of(&children[4]), Some("  "));
    }

    #[test]
    fn normalizes_parsed_document() {
        let source = "# Title\n\n```JavaScript\nlet a = 1;\n```\n\n- item\n\n  ```Shell\n  ls\n  ```\n";
        let mut tree = markdown::to_mdast(source, &markdown::ParseOptions::gfm()).unwrap();

        normalize_tree(&mut tree);

        let mut langs = Vec::new();
        collect_langs(&tree, &mut langs);
        assert_eq!(langs, vec![Some("js".to_string()), Some("bash".to_string())]);
    }

    fn collect_langs(node: &Node, out: &mut Vec<Option<String>>) {
        if let Node::Code(code) = node {
            out.push(code.lang.clone());
        }
        if let Some(children) = node.children() {
            for child in children {
                collect_langs(child, out);
            }
        }
    }

    #[test]
    fn normalize_info_keeps_meta() {
        assert_eq!(normalize_info("JavaScript title=\"a.js\""), "js title=\"a.js\"");
        assert_eq!(normalize_info("TSX live"), "tsx live");
        assert_eq!(normalize_info("Elixir"), "elixir");
        assert_eq!(normalize_info(""), "");
    }

    #[test]
    fn event_adapter_rewrites_fenced_blocks() {
        let source = "```YML\nkey: value\n```\n\n    indented\n\n```\nplain\n```\n";

        let infos: Vec<String> = NormalizeCodeLang::new(Parser::new(source))
            .filter_map(|event| match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    Some(info.to_string())
                }
                Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)) => {
                    Some("<indented>".to_string())
                }
                _ => None,
            })
            .collect();

        assert_eq!(infos, vec!["yaml", "<indented>", ""]);
    }
}
