//! # Vault Dialect Extensions
//!
//! Each extension is a [`MarkdownConfig`]: the node kinds it introduces and
//! the block/inline rules it adds, positioned relative to the host rules.
//!
//! | Extension | Syntax | Nodes |
//! |-----------|--------|-------|
//! | [`COMMENT`] | `%%hidden%%` | COMMENT, COMMENT_MARKER |
//! | [`FOOTNOTE`] | `[^1]`, `[^1]: text` | FOOTNOTE, FOOTNOTE_REFERENCE, FOOTNOTE_MARK, FOOTNOTE_LABEL |
//! | [`HASHTAG`] | `#tag` | HASHTAG, HASHTAG_MARK, HASHTAG_LABEL |
//! | [`INTERNAL_LINK`] | `[[note#heading\|text]]`, `![[image.png]]` | INTERNAL_LINK, EMBED, ... |
//! | [`MARK`] | `==highlight==` | MARK, MARK_MARKER |
//! | [`STRIKETHROUGH`] | `~~gone~~` | STRIKETHROUGH, STRIKETHROUGH_MARK |
//! | [`TABLE`] | `a \| b` over `--\|--` | TABLE, TABLE_HEADER, TABLE_ROW, TABLE_CELL, TABLE_DELIMITER |
//! | [`TASK_LIST`] | `- [x] done` | TASK, TASK_MARKER |
//! | [`TEX`] | `$x$`, `$$...$$` | TEX_INLINE, TEX_BLOCK, TEX_MARKER |
//! | [`YAML_FRONT_MATTER`] | leading `---` block | YAML_FRONT_MATTER, YAML_MARKER, YAML_CONTENT |
//!
//! ```
//! use markdown_vault_syntax::{MarkdownParser, SyntaxKind, extensions};
//!
//! let parser = MarkdownParser::default()
//!     .configure(&extensions::all())
//!     .expect("built-in positions resolve");
//! let doc = parser.parse("See [[Other note]] #todo\n");
//! assert!(doc.find(SyntaxKind::INTERNAL_LINK).is_some());
//! assert!(doc.find(SyntaxKind::HASHTAG).is_some());
//! ```

pub mod comment;
pub mod footnote;
pub mod hashtag;
pub mod internal_link;
pub mod mark;
mod marked_block;
pub mod strikethrough;
pub mod table;
pub mod task_list;
pub mod tex;
pub mod yaml_front_matter;

use std::sync::OnceLock;

use crate::parser::{MarkdownConfig, MarkdownParser};

pub use comment::COMMENT;
pub use footnote::FOOTNOTE;
pub use hashtag::HASHTAG;
pub use internal_link::INTERNAL_LINK;
pub use mark::MARK;
pub use strikethrough::STRIKETHROUGH;
pub use table::TABLE;
pub use task_list::TASK_LIST;
pub use tex::TEX;
pub use yaml_front_matter::YAML_FRONT_MATTER;

/// Every extension, in the order they are applied.
pub const ALL: [MarkdownConfig; 10] = [
    COMMENT,
    FOOTNOTE,
    HASHTAG,
    INTERNAL_LINK,
    MARK,
    STRIKETHROUGH,
    TABLE,
    TASK_LIST,
    TEX,
    YAML_FRONT_MATTER,
];

/// Every extension as an owned list, ready for [`MarkdownParser::configure`].
pub fn all() -> Vec<MarkdownConfig> {
    ALL.to_vec()
}

/// Every extension except front matter, for parsing fragments that are not
/// whole documents.
pub fn block_and_inline() -> Vec<MarkdownConfig> {
    ALL.iter()
        .copied()
        .filter(|ext| ext.name != YAML_FRONT_MATTER.name)
        .collect()
}

/// Look up an extension by its configuration name (`"internal-link"`).
pub fn by_name(name: &str) -> Option<MarkdownConfig> {
    ALL.iter().copied().find(|ext| ext.name == name)
}

/// Names of every extension, in application order.
pub fn names() -> impl Iterator<Item = &'static str> {
    ALL.iter().map(|ext| ext.name)
}

/// The host grammar with every extension applied, built once.
pub fn parser() -> &'static MarkdownParser {
    static PARSER: OnceLock<MarkdownParser> = OnceLock::new();
    PARSER.get_or_init(|| {
        MarkdownParser::default()
            .configure(&ALL)
            .expect("built-in extension positions resolve")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn block_rule_order() {
        assert_eq!(
            parser().block_names(),
            &[
                "FootnoteReference",
                "YAMLFrontMatter",
                "LinkReference",
                "FencedCode",
                "Blockquote",
                "HorizontalRule",
                "BulletList",
                "OrderedList",
                "ATXHeading",
                "CommentBlock",
                "Table",
                "SetextHeading",
                "TexBlock",
                "TaskList",
            ]
        );
    }

    #[test]
    fn inline_rule_order() {
        assert_eq!(
            parser().inline_names(),
            &[
                "Escape",
                "InlineCode",
                "Emphasis",
                "Strikethrough",
                "Footnote",
                "InternalLink",
                "Link",
                "Embed",
                "Image",
                "CommentInline",
                "Hashtag",
                "Mark",
                "TexInline",
                "LinkEnd",
            ]
        );
    }

    #[test]
    fn block_and_inline_skips_front_matter() {
        let names: Vec<_> = block_and_inline().iter().map(|ext| ext.name).collect();
        assert_eq!(names.len(), ALL.len() - 1);
        assert!(!names.contains(&"yaml-front-matter"));
        let parser = MarkdownParser::default()
            .configure(&block_and_inline())
            .unwrap();
        assert!(!parser.block_names().contains(&"YAMLFrontMatter"));
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("internal-link").map(|ext| ext.name), Some("internal-link"));
        assert!(by_name("tables").is_none());
        assert_eq!(names().count(), ALL.len());
    }

    #[test]
    fn extensions_declare_their_nodes() {
        use crate::syntax_kind::SyntaxKind;
        let parser = parser();
        for kind in [
            SyntaxKind::COMMENT,
            SyntaxKind::FOOTNOTE_REFERENCE,
            SyntaxKind::HASHTAG_LABEL,
            SyntaxKind::EMBED,
            SyntaxKind::MARK,
            SyntaxKind::STRIKETHROUGH,
            SyntaxKind::TABLE_CELL,
            SyntaxKind::TASK,
            SyntaxKind::TEX_BLOCK,
            SyntaxKind::YAML_CONTENT,
        ] {
            assert!(parser.defines(kind), "{kind:?}");
        }
    }

    #[test]
    fn configuring_twice_keeps_rule_count() {
        let once = parser();
        let twice = once.configure(&ALL).unwrap();
        assert_eq!(once.block_names(), twice.block_names());
        assert_eq!(once.inline_names(), twice.inline_names());
    }
}
