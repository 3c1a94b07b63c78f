//! GFM `~~strikethrough~~`.

use crate::parser::grammar::inline::flanking;
use crate::parser::{DelimiterType, InlineContext, InlineParserSpec, MarkdownConfig, Position};
use crate::syntax_kind::SyntaxKind;

const STRIKETHROUGH_DELIM: DelimiterType = DelimiterType::new(
    "Strikethrough",
    SyntaxKind::STRIKETHROUGH,
    SyntaxKind::STRIKETHROUGH_MARK,
);

fn parse_inline(cx: &mut InlineContext<'_>, next: char, pos: usize) -> Option<usize> {
    if next != '~' || cx.char(pos + 1) != Some('~') || cx.char(pos + 2) == Some('~') {
        return None;
    }
    let (can_open, can_close) = flanking(cx, pos, pos + 2, true);
    Some(cx.add_delimiter(STRIKETHROUGH_DELIM, pos, pos + 2, can_open, can_close))
}

pub const STRIKETHROUGH: MarkdownConfig = MarkdownConfig {
    name: "strikethrough",
    define_nodes: &[SyntaxKind::STRIKETHROUGH, SyntaxKind::STRIKETHROUGH_MARK],
    parse_block: &[],
    parse_inline: &[InlineParserSpec {
        name: "Strikethrough",
        parse: parse_inline,
        position: Some(Position::After("Emphasis")),
    }],
};
