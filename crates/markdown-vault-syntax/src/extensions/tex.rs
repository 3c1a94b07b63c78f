//! TeX math: `$inline$` spans and `$$` display blocks.
//!
//! Only the boundaries are recognised; the math itself is not parsed.

use std::sync::OnceLock;

use regex::Regex;

use super::marked_block::MarkedBlock;
use crate::parser::{
    BlockContext, BlockParserSpec, BlockResult, DelimiterType, InlineContext, InlineParserSpec,
    LeafBlock, MarkdownConfig,
};
use crate::syntax_kind::SyntaxKind;

const TEX_DELIM: DelimiterType =
    DelimiterType::new("TexInline", SyntaxKind::TEX_INLINE, SyntaxKind::TEX_MARKER);

fn close_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(^|[^\\])\$\$").expect("valid regex"))
}

const BLOCK: MarkedBlock = MarkedBlock {
    marker: "$$",
    kind: SyntaxKind::TEX_BLOCK,
    mark: SyntaxKind::TEX_MARKER,
    close: close_regex,
};

fn parse_block(cx: &mut BlockContext<'_>) -> BlockResult {
    BLOCK.parse(cx)
}

fn end_leaf(cx: &BlockContext<'_>, _: &LeafBlock) -> bool {
    BLOCK.starts_line(cx)
}

fn parse_inline(cx: &mut InlineContext<'_>, next: char, pos: usize) -> Option<usize> {
    if next != '$' {
        return None;
    }
    let before = cx.char_before(pos);
    let after = cx.char(pos + 1);
    // `$5 and $6` are prices, not math.
    let can_close = before.is_some_and(|c| c != ' ' && c != '\t')
        && !after.is_some_and(|c| c.is_ascii_digit());
    let can_open = after.is_some_and(|c| !matches!(c, '$' | ' ' | '\t'));
    Some(cx.add_delimiter(TEX_DELIM, pos, pos + 1, can_open, can_close))
}

pub const TEX: MarkdownConfig = MarkdownConfig {
    name: "tex",
    define_nodes: &[
        SyntaxKind::TEX_BLOCK,
        SyntaxKind::TEX_INLINE,
        SyntaxKind::TEX_MARKER,
    ],
    parse_block: &[BlockParserSpec {
        name: "TexBlock",
        parse: Some(parse_block),
        leaf: None,
        end_leaf: Some(end_leaf),
        position: None,
    }],
    parse_inline: &[InlineParserSpec {
        name: "TexInline",
        parse: parse_inline,
        position: None,
    }],
};
