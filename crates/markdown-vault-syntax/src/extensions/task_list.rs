//! GFM task list items: a list item whose text starts with `[ ]`, `[x]` or
//! any other single character between brackets.

use std::sync::OnceLock;

use regex::Regex;

use crate::element::Element;
use crate::parser::{
    BlockContext, BlockParserSpec, LeafBlock, LeafParser, MarkdownConfig, Position,
};
use crate::syntax_kind::SyntaxKind;

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[.\]").expect("valid regex"))
}

fn start_task(cx: &BlockContext<'_>, leaf: &LeafBlock) -> Option<LeafParser> {
    if cx.parent_type() != SyntaxKind::LIST_ITEM {
        return None;
    }
    let marker = marker_regex().find(&leaf.content)?;
    Some(LeafParser::Task {
        marker_len: marker.end(),
    })
}

pub(crate) fn finish(cx: &mut BlockContext<'_>, leaf: &LeafBlock, marker_len: usize) -> bool {
    let start = leaf.start;
    let mut children = vec![Element::leaf(
        SyntaxKind::TASK_MARKER,
        start,
        start + marker_len,
    )];
    children.extend(
        cx.parser()
            .parse_inline(&leaf.content[marker_len..], start + marker_len),
    );
    let task = Element::new(
        SyntaxKind::TASK,
        start,
        start + leaf.content.len(),
        children,
    );
    cx.add_leaf_element(leaf, task);
    true
}

pub const TASK_LIST: MarkdownConfig = MarkdownConfig {
    name: "task-list",
    define_nodes: &[SyntaxKind::TASK, SyntaxKind::TASK_MARKER],
    parse_block: &[BlockParserSpec {
        name: "TaskList",
        parse: None,
        leaf: Some(start_task),
        end_leaf: None,
        position: Some(Position::After("SetextHeading")),
    }],
    parse_inline: &[],
};

#[cfg(test)]
mod tests {
    use crate::test_support::render;
    use insta::assert_snapshot;

    #[test]
    fn task_in_list_item() {
        assert_snapshot!(
            render("- [ ] todo"),
            @"{BULLET_LIST:{LIST_ITEM:{LIST_MARK:-} {TASK:{TASK_MARKER:[ ]} todo}}}"
        );
    }

    #[test]
    fn brackets_outside_list_are_a_link() {
        assert_snapshot!(
            render("[x] not a task"),
            @"{PARAGRAPH:{LINK:{LINK_MARK:[}x{LINK_MARK:]}} not a task}"
        );
    }

    #[test]
    fn multibyte_marker() {
        assert_snapshot!(
            render("1. [✓] done"),
            @"{ORDERED_LIST:{LIST_ITEM:{LIST_MARK:1.} {TASK:{TASK_MARKER:[✓]} done}}}"
        );
    }

    #[test]
    fn task_with_continuation_line() {
        assert_snapshot!(
            render("- [x] one\n  two"),
            @r"{BULLET_LIST:{LIST_ITEM:{LIST_MARK:-} {TASK:{TASK_MARKER:[x]} one\n  two}}}"
        );
    }
}
