//! `==highlighted==` spans.

use crate::parser::{DelimiterType, InlineContext, InlineParserSpec, MarkdownConfig};
use crate::syntax_kind::SyntaxKind;

const MARK_DELIM: DelimiterType =
    DelimiterType::new("Mark", SyntaxKind::MARK, SyntaxKind::MARK_MARKER);

fn parse_inline(cx: &mut InlineContext<'_>, next: char, pos: usize) -> Option<usize> {
    if next != '=' || cx.char(pos + 1) != Some('=') {
        return None;
    }
    Some(cx.add_delimiter(MARK_DELIM, pos, pos + 2, true, true))
}

pub const MARK: MarkdownConfig = MarkdownConfig {
    name: "mark",
    define_nodes: &[SyntaxKind::MARK, SyntaxKind::MARK_MARKER],
    parse_block: &[],
    parse_inline: &[InlineParserSpec {
        name: "Mark",
        parse: parse_inline,
        position: None,
    }],
};

#[cfg(test)]
mod tests {
    use crate::test_support::render;
    use insta::assert_snapshot;

    #[test]
    fn highlight() {
        assert_snapshot!(
            render("==Hi== there"),
            @"{PARAGRAPH:{MARK:{MARK_MARKER:==}Hi{MARK_MARKER:==}} there}"
        );
    }

    #[test]
    fn unpaired_marker_is_text() {
        assert_snapshot!(render("a == b"), @"{PARAGRAPH:a == b}");
    }

    #[test]
    fn markers_pair_left_to_right() {
        assert_snapshot!(
            render("==a== ==b"),
            @"{PARAGRAPH:{MARK:{MARK_MARKER:==}a{MARK_MARKER:==}} ==b}"
        );
    }
}
