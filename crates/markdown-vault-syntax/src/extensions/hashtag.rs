//! `#tag` hashtags.

use std::sync::OnceLock;

use regex::Regex;

use crate::element::Element;
use crate::parser::{InlineContext, InlineParserSpec, MarkdownConfig};
use crate::syntax_kind::SyntaxKind;

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r##"^[^\x{2000}-\x{206F}\x{2E00}-\x{2E7F}'!"#$%&()*+,.:;<=>?@^`{|}~\[\]\\\s]+"##)
            .expect("valid regex")
    })
}

/// Length of the tag label at the start of `text`. Labels made only of
/// digits (`#1234`) are not tags.
pub fn label_len(text: &str) -> Option<usize> {
    let label = label_regex().find(text)?.as_str();
    (!label.bytes().all(|b| b.is_ascii_digit())).then_some(label.len())
}

fn parse_inline(cx: &mut InlineContext<'_>, next: char, pos: usize) -> Option<usize> {
    if next != '#' {
        return None;
    }
    let end = pos + 1 + label_len(cx.slice(pos + 1, cx.end()))?;
    Some(cx.add_element(Element::new(
        SyntaxKind::HASHTAG,
        pos,
        end,
        vec![
            Element::leaf(SyntaxKind::HASHTAG_MARK, pos, pos + 1),
            Element::leaf(SyntaxKind::HASHTAG_LABEL, pos + 1, end),
        ],
    )))
}

pub const HASHTAG: MarkdownConfig = MarkdownConfig {
    name: "hashtag",
    define_nodes: &[
        SyntaxKind::HASHTAG,
        SyntaxKind::HASHTAG_MARK,
        SyntaxKind::HASHTAG_LABEL,
    ],
    parse_block: &[],
    parse_inline: &[InlineParserSpec {
        name: "Hashtag",
        parse: parse_inline,
        position: None,
    }],
};
