//! YAML front matter: a `---` fenced block at the very start of a document.
//!
//! ```text
//! ---
//! tags: [a, b]
//! ---
//! ```
//!
//! Detection runs once per parse, at the first block. Only the fences and
//! content range are marked; the YAML is not parsed.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::element::Element;
use crate::parser::{BlockContext, BlockParserSpec, BlockResult, MarkdownConfig, Position};
use crate::syntax_kind::SyntaxKind;

fn front_matter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A(|\s*\n)(---\n.+?\n---)").expect("valid regex"))
}

/// Byte range of the front matter block, fences included.
pub fn front_matter_range(input: &str) -> Option<(usize, usize)> {
    let captures = front_matter_regex().captures(input)?;
    let block = captures.get(2)?;
    Some((block.start(), block.end()))
}

fn parse_block(cx: &mut BlockContext<'_>) -> BlockResult {
    if cx.checked_yaml {
        return BlockResult::Decline;
    }
    cx.checked_yaml = true;
    let Some((start, end)) = front_matter_range(cx.input()) else {
        return BlockResult::Decline;
    };
    debug!("Front matter at {start}..{end}");
    cx.add_element(Element::new(
        SyntaxKind::YAML_FRONT_MATTER,
        start,
        end,
        vec![
            Element::leaf(SyntaxKind::YAML_MARKER, start, start + 3),
            Element::leaf(SyntaxKind::YAML_CONTENT, start + 4, end - 4),
            Element::leaf(SyntaxKind::YAML_MARKER, end - 3, end),
        ],
    ));
    while cx.line_start() + cx.line.text.len() < end && cx.next_line() {}
    // Text after the closing fence on the same line is ordinary content.
    let after_fence = cx.line.skip_space(3);
    cx.line.move_to(after_fence);
    BlockResult::Done
}

pub const YAML_FRONT_MATTER: MarkdownConfig = MarkdownConfig {
    name: "yaml-front-matter",
    define_nodes: &[
        SyntaxKind::YAML_FRONT_MATTER,
        SyntaxKind::YAML_MARKER,
        SyntaxKind::YAML_CONTENT,
    ],
    parse_block: &[BlockParserSpec {
        name: "YAMLFrontMatter",
        parse: Some(parse_block),
        leaf: None,
        end_leaf: None,
        position: Some(Position::Before("LinkReference")),
    }],
    parse_inline: &[],
};
