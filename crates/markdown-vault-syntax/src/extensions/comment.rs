//! `%%` comments: hidden text, either as a block starting a line or inline
//! within a paragraph.

use std::sync::OnceLock;

use regex::Regex;

use super::marked_block::MarkedBlock;
use crate::parser::{
    BlockContext, BlockParserSpec, BlockResult, DelimiterType, InlineContext, InlineParserSpec,
    LeafBlock, MarkdownConfig,
};
use crate::syntax_kind::SyntaxKind;

const COMMENT_DELIM: DelimiterType =
    DelimiterType::new("Comment", SyntaxKind::COMMENT, SyntaxKind::COMMENT_MARKER);

fn close_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(^|[^\\])%%").expect("valid regex"))
}

const BLOCK: MarkedBlock = MarkedBlock {
    marker: "%%",
    kind: SyntaxKind::COMMENT,
    mark: SyntaxKind::COMMENT_MARKER,
    close: close_regex,
};

fn parse_block(cx: &mut BlockContext<'_>) -> BlockResult {
    BLOCK.parse(cx)
}

fn end_leaf(cx: &BlockContext<'_>, _: &LeafBlock) -> bool {
    BLOCK.starts_line(cx)
}

fn parse_inline(cx: &mut InlineContext<'_>, next: char, pos: usize) -> Option<usize> {
    if next != '%' || cx.char(pos + 1) != Some('%') {
        return None;
    }
    // A comment opened on an earlier line of the paragraph cannot be closed
    // here unless another `%%` followed that line break.
    let before = cx.slice(cx.offset(), pos);
    let can_close = before.rfind('\n') <= before.rfind("%%");
    Some(cx.add_delimiter(COMMENT_DELIM, pos, pos + 2, true, can_close))
}

pub const COMMENT: MarkdownConfig = MarkdownConfig {
    name: "comment",
    define_nodes: &[SyntaxKind::COMMENT, SyntaxKind::COMMENT_MARKER],
    parse_block: &[BlockParserSpec {
        name: "CommentBlock",
        parse: Some(parse_block),
        leaf: None,
        end_leaf: Some(end_leaf),
        position: None,
    }],
    parse_inline: &[InlineParserSpec {
        name: "CommentInline",
        parse: parse_inline,
        position: None,
    }],
};
