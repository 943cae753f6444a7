pub mod add_frontmatter;
pub mod code_langs;
pub mod fix_fences;
