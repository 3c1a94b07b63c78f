//! # Grammar Rules
//!
//! The host grammar every parser starts from: a CommonMark subset with
//! paragraphs, headings, lists, blockquotes, fenced code, emphasis, code
//! spans, links and images.
//!
//! ## Module Structure
//!
//! - [`block`] - Block rules, leaf parsers and end-leaf predicates
//! - [`inline`] - Inline rules and the link/emphasis helpers extensions share
//!
//! ## Writing Rules
//!
//! Block rules look at `cx.line` and return [`BlockResult`](super::BlockResult):
//!
//! ```ignore
//! fn horizontal_rule(cx: &mut BlockContext<'_>) -> BlockResult {
//!     if !is_horizontal_rule(cx, false) {
//!         return BlockResult::Decline;        // 1. Not ours
//!     }
//!     let from = cx.line_start() + cx.line.pos;
//!     cx.next_line();                         // 2. Consume the line
//!     cx.add_node(HORIZONTAL_RULE, from, cx.prev_line_end());
//!     BlockResult::Done                       // 3. Block finished
//! }
//! ```
//!
//! Inline rules return the offset to resume at, or `None` to let the next
//! rule look at the same character. Rules never fail: anything they do not
//! recognise stays plain text.

pub(crate) mod block;
pub(crate) mod inline;

use crate::parser::{BlockParserSpec, EndLeafFn, InlineParserSpec, MarkdownParser};

const BLOCK_RULES: &[BlockParserSpec] = &[
    rule("LinkReference", None, Some(block::link_reference)),
    rule("FencedCode", Some(block::fenced_code), None),
    rule("Blockquote", Some(block::blockquote), None),
    rule("HorizontalRule", Some(block::horizontal_rule), None),
    rule("BulletList", Some(block::bullet_list), None),
    rule("OrderedList", Some(block::ordered_list), None),
    rule("ATXHeading", Some(block::atx_heading), None),
    rule("SetextHeading", None, Some(block::setext_heading)),
];

const END_LEAF: &[EndLeafFn] = &[
    block::end_leaf_atx_heading,
    block::end_leaf_fenced_code,
    block::end_leaf_blockquote,
    block::end_leaf_bullet_list,
    block::end_leaf_ordered_list,
    block::end_leaf_horizontal_rule,
];

const INLINE_RULES: &[InlineParserSpec] = &[
    inline_rule("Escape", inline::escape),
    inline_rule("InlineCode", inline::inline_code),
    inline_rule("Emphasis", inline::emphasis),
    inline_rule("Link", inline::link),
    inline_rule("Image", inline::image),
    inline_rule("LinkEnd", inline::link_end),
];

const fn rule(
    name: &'static str,
    parse: Option<crate::parser::BlockParseFn>,
    leaf: Option<crate::parser::LeafStartFn>,
) -> BlockParserSpec {
    BlockParserSpec {
        name,
        parse,
        leaf,
        end_leaf: None,
        position: None,
    }
}

const fn inline_rule(name: &'static str, parse: crate::parser::InlineParseFn) -> InlineParserSpec {
    InlineParserSpec {
        name,
        parse,
        position: None,
    }
}

/// The host grammar with no extensions.
pub(crate) fn commonmark() -> MarkdownParser {
    MarkdownParser {
        node_kinds: Vec::new(),
        block_names: BLOCK_RULES.iter().map(|r| r.name).collect(),
        block_parsers: BLOCK_RULES.iter().map(|r| r.parse).collect(),
        leaf_parsers: BLOCK_RULES.iter().map(|r| r.leaf).collect(),
        end_leaf: END_LEAF.to_vec(),
        inline_names: INLINE_RULES.iter().map(|r| r.name).collect(),
        inline_parsers: INLINE_RULES.iter().map(|r| r.parse).collect(),
    }
}
