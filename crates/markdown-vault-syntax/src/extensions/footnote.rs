//! Footnotes: `[^label]` references inline and `[^label]: text`
//! definitions as blocks.
//!
//! A definition absorbs continuation lines like a paragraph does, and also
//! ends where the next definition starts.

use std::sync::OnceLock;

use regex::Regex;

use crate::element::Element;
use crate::parser::{
    BlockContext, BlockParserSpec, InlineContext, InlineParserSpec, LeafBlock, LeafParser,
    MarkdownConfig, Position,
};
use crate::syntax_kind::SyntaxKind;

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[\^[^\s\[\]]+\]").expect("valid regex"))
}

fn definition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[\^[^\s\[\]]+\]:").expect("valid regex"))
}

/// Length of the `[^label]:` prefix when `text` starts a definition.
fn definition_prefix(text: &str) -> Option<usize> {
    definition_regex().find(text).map(|m| m.end())
}

fn parse_inline(cx: &mut InlineContext<'_>, next: char, pos: usize) -> Option<usize> {
    if next != '[' {
        return None;
    }
    let found = reference_regex().find(cx.slice(pos, cx.end()))?;
    let end = pos + found.end();
    Some(cx.add_element(Element::new(
        SyntaxKind::FOOTNOTE,
        pos,
        end,
        vec![
            Element::leaf(SyntaxKind::FOOTNOTE_MARK, pos, pos + 2),
            Element::leaf(SyntaxKind::FOOTNOTE_LABEL, pos + 2, end - 1),
            Element::leaf(SyntaxKind::FOOTNOTE_MARK, end - 1, end),
        ],
    )))
}

fn start_definition(_: &BlockContext<'_>, leaf: &LeafBlock) -> Option<LeafParser> {
    definition_prefix(&leaf.content).map(|len| LeafParser::FootnoteReference {
        label_end: leaf.start + len,
    })
}

/// A new definition on the current line ends the one being collected.
pub(crate) fn next_line(cx: &mut BlockContext<'_>, leaf: &LeafBlock, label_end: usize) -> bool {
    definition_prefix(cx.line.rest()).is_some() && complete(cx, leaf, label_end)
}

pub(crate) fn complete(cx: &mut BlockContext<'_>, leaf: &LeafBlock, label_end: usize) -> bool {
    let start = leaf.start;
    let mut children = vec![
        Element::leaf(SyntaxKind::FOOTNOTE_MARK, start, start + 2),
        Element::leaf(SyntaxKind::FOOTNOTE_LABEL, start + 2, label_end - 2),
        Element::leaf(SyntaxKind::FOOTNOTE_MARK, label_end - 2, label_end),
    ];
    let body = &leaf.content[label_end - start..];
    children.extend(cx.parser().parse_inline(body, label_end));
    let element = Element::new(
        SyntaxKind::FOOTNOTE_REFERENCE,
        start,
        start + leaf.content.len(),
        children,
    );
    cx.add_leaf_element(leaf, element);
    true
}

pub const FOOTNOTE: MarkdownConfig = MarkdownConfig {
    name: "footnote",
    define_nodes: &[
        SyntaxKind::FOOTNOTE,
        SyntaxKind::FOOTNOTE_LABEL,
        SyntaxKind::FOOTNOTE_MARK,
        SyntaxKind::FOOTNOTE_REFERENCE,
    ],
    parse_block: &[BlockParserSpec {
        name: "FootnoteReference",
        parse: None,
        leaf: Some(start_definition),
        end_leaf: None,
        position: Some(Position::Before("LinkReference")),
    }],
    parse_inline: &[InlineParserSpec {
        name: "Footnote",
        parse: parse_inline,
        position: Some(Position::Before("Link")),
    }],
};
