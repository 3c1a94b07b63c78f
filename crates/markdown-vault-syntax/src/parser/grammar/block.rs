//! # Block-Level Grammar
//!
//! Container and leaf block rules of the host grammar.
//!
//! | Rule | Starts with | Result |
//! |------|-------------|--------|
//! | FencedCode | ```` ``` ```` or `~~~` | FENCED_CODE (consumes to the closing fence) |
//! | Blockquote | `>` | BLOCKQUOTE container |
//! | HorizontalRule | three or more `-`, `*`, `_` | HORIZONTAL_RULE |
//! | BulletList | `-`, `+`, `*` then space | BULLET_LIST + LIST_ITEM containers |
//! | OrderedList | digits then `.` or `)` | ORDERED_LIST + LIST_ITEM containers |
//! | ATXHeading | `#` to `######` | ATX_HEADING1..6 |
//!
//! Two leaf rules can reclassify a paragraph once it is collected:
//! setext headings (text over a `===`/`---` underline) and single-line link
//! reference definitions.
//!
//! The `is_*` predicates are shared by the rules, the container
//! continuation logic and the end-leaf checks. With `breaking` set they
//! apply the stricter conditions for interrupting a paragraph.

use crate::element::Element;
use crate::parser::block::{BlockContext, BlockResult, LeafBlock};
use crate::parser::grammar::inline::parse_link_label;
use crate::parser::leaf::LeafParser;
use crate::parser::line::{Line, is_space, skip_space_back};
use crate::syntax_kind::SyntaxKind;

fn byte_at(line: &Line<'_>, pos: usize) -> Option<u8> {
    line.text.as_bytes().get(pos).copied()
}

pub(crate) fn is_atx_heading(line: &Line<'_>) -> Option<usize> {
    if line.next != Some('#') {
        return None;
    }
    let mut pos = line.pos + 1;
    while byte_at(line, pos) == Some(b'#') {
        pos += 1;
    }
    if pos < line.text.len() && byte_at(line, pos) != Some(b' ') {
        return None;
    }
    let size = pos - line.pos;
    (size <= 6).then_some(size)
}

/// Returns the position just past the opening fence.
pub(crate) fn is_fenced_code(line: &Line<'_>) -> Option<usize> {
    let fence = match line.next {
        Some('`') => b'`',
        Some('~') => b'~',
        _ => return None,
    };
    let mut pos = line.pos + 1;
    while byte_at(line, pos) == Some(fence) {
        pos += 1;
    }
    if pos < line.pos + 3 {
        return None;
    }
    if fence == b'`' && line.text.as_bytes()[pos..].contains(&b'`') {
        return None;
    }
    Some(pos)
}

pub(crate) fn is_blockquote(line: &Line<'_>) -> Option<usize> {
    if line.next != Some('>') {
        return None;
    }
    Some(if byte_at(line, line.pos + 1) == Some(b' ') {
        2
    } else {
        1
    })
}

pub(crate) fn is_horizontal_rule(cx: &BlockContext<'_>, breaking: bool) -> bool {
    let line = &cx.line;
    let rule = match line.next {
        Some(c @ ('_' | '-' | '*')) => c as u8,
        _ => return false,
    };
    let mut count = 1;
    for &b in &line.text.as_bytes()[line.pos + 1..] {
        if b == rule {
            count += 1;
        } else if !is_space(b as char) {
            return false;
        }
    }
    // Setext underlines take precedence when interrupting a paragraph.
    if breaking
        && rule == b'-'
        && is_setext_underline(line).is_some()
        && line.depth == cx.depth()
        && cx.parser().has_leaf_parser("SetextHeading")
    {
        return false;
    }
    count >= 3
}

pub(crate) fn is_bullet_list(cx: &BlockContext<'_>, breaking: bool) -> Option<usize> {
    let line = &cx.line;
    let is_marker = matches!(line.next, Some('-' | '+' | '*'));
    let spaced = line.pos + 1 == line.text.len()
        || byte_at(line, line.pos + 1).is_some_and(|b| is_space(b as char));
    let allowed = !breaking
        || cx.in_list(SyntaxKind::BULLET_LIST)
        || line.skip_space(line.pos + 2) < line.text.len();
    (is_marker && spaced && allowed).then_some(1)
}

pub(crate) fn is_ordered_list(cx: &BlockContext<'_>, breaking: bool) -> Option<usize> {
    let line = &cx.line;
    let bytes = line.text.as_bytes();
    let mut pos = line.pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let next = *bytes.get(pos)?;
    if pos == line.pos
        || pos > line.pos + 9
        || (next != b'.' && next != b')')
        || (pos + 1 < bytes.len() && !is_space(bytes[pos + 1] as char))
    {
        return None;
    }
    if breaking
        && !cx.in_list(SyntaxKind::ORDERED_LIST)
        && (line.skip_space(pos + 1) == bytes.len() || pos > line.pos + 1 || line.next != Some('1'))
    {
        return None;
    }
    Some(pos + 1 - line.pos)
}

/// Returns the end of the underline run.
pub(crate) fn is_setext_underline(line: &Line<'_>) -> Option<usize> {
    let underline = match line.next {
        Some(c @ ('-' | '=')) => c as u8,
        _ => return None,
    };
    if line.indent >= line.base_indent + 4 {
        return None;
    }
    let mut pos = line.pos + 1;
    while byte_at(line, pos) == Some(underline) {
        pos += 1;
    }
    let end = pos;
    while byte_at(line, pos).is_some_and(|b| is_space(b as char)) {
        pos += 1;
    }
    (pos == line.text.len()).then_some(end)
}

fn list_indent(line: &Line<'_>, pos: usize) -> usize {
    let indent_after = line.count_indent(pos, line.pos, line.indent);
    let indented = line.count_indent(line.skip_space(pos), pos, indent_after);
    if indented >= indent_after + 5 {
        indent_after + 1
    } else {
        indented
    }
}

fn push_code_text(marks: &mut Vec<Element>, from: usize, to: usize) {
    if let Some(last) = marks.last_mut()
        && last.kind == SyntaxKind::CODE_TEXT
        && last.to == from
    {
        last.to = to;
        return;
    }
    marks.push(Element::leaf(SyntaxKind::CODE_TEXT, from, to));
}

pub(crate) fn fenced_code(cx: &mut BlockContext<'_>) -> BlockResult {
    let Some(fence_end) = is_fenced_code(&cx.line) else {
        return BlockResult::Decline;
    };
    let line = &cx.line;
    let from = cx.line_start() + line.pos;
    let fence = line.text.as_bytes()[line.pos];
    let len = fence_end - line.pos;
    let info_from = line.skip_space(fence_end);
    let info_to = skip_space_back(line.text, line.text.len(), info_from);
    let mut marks = vec![Element::leaf(SyntaxKind::CODE_MARK, from, from + len)];
    if info_from < info_to {
        marks.push(Element::leaf(
            SyntaxKind::CODE_INFO,
            cx.line_start() + info_from,
            cx.line_start() + info_to,
        ));
    }

    let mut first = true;
    while cx.next_line() && cx.line.depth >= cx.depth() {
        let line = &cx.line;
        let mut i = line.pos;
        if line.indent < line.base_indent + 4 {
            while byte_at(line, i) == Some(fence) {
                i += 1;
            }
        }
        if i - line.pos >= len && line.skip_space(i) == line.text.len() {
            marks.extend(line.markers.iter().cloned());
            marks.push(Element::leaf(
                SyntaxKind::CODE_MARK,
                cx.line_start() + line.pos,
                cx.line_start() + i,
            ));
            cx.next_line();
            break;
        }
        if !first {
            push_code_text(&mut marks, cx.line_start() - 1, cx.line_start());
        }
        marks.extend(line.markers.iter().cloned());
        let text_start = cx.line_start() + line.base_pos;
        let text_end = cx.line_start() + line.text.len();
        if text_start < text_end {
            push_code_text(&mut marks, text_start, text_end);
        }
        first = false;
    }
    let end = cx.prev_line_end().max(from);
    cx.add_element(Element::new(SyntaxKind::FENCED_CODE, from, end, marks));
    BlockResult::Done
}

pub(crate) fn blockquote(cx: &mut BlockContext<'_>) -> BlockResult {
    let Some(size) = is_blockquote(&cx.line) else {
        return BlockResult::Decline;
    };
    let pos = cx.line.pos;
    cx.start_context(SyntaxKind::BLOCKQUOTE, pos, 0);
    let at = cx.line_start() + pos;
    cx.add_node(SyntaxKind::QUOTE_MARK, at, at + 1);
    cx.line.move_base(pos + size);
    BlockResult::Container
}

pub(crate) fn horizontal_rule(cx: &mut BlockContext<'_>) -> BlockResult {
    if !is_horizontal_rule(cx, false) {
        return BlockResult::Decline;
    }
    let from = cx.line_start() + cx.line.pos;
    cx.next_line();
    let to = cx.prev_line_end();
    cx.add_node(SyntaxKind::HORIZONTAL_RULE, from, to);
    BlockResult::Done
}

pub(crate) fn bullet_list(cx: &mut BlockContext<'_>) -> BlockResult {
    let Some(size) = is_bullet_list(cx, false) else {
        return BlockResult::Decline;
    };
    let marker = cx.line.next.map_or(0, |c| c as usize);
    open_list_item(cx, SyntaxKind::BULLET_LIST, size, marker)
}

pub(crate) fn ordered_list(cx: &mut BlockContext<'_>) -> BlockResult {
    let Some(size) = is_ordered_list(cx, false) else {
        return BlockResult::Decline;
    };
    let marker = byte_at(&cx.line, cx.line.pos + size - 1).map_or(0, usize::from);
    open_list_item(cx, SyntaxKind::ORDERED_LIST, size, marker)
}

fn open_list_item(
    cx: &mut BlockContext<'_>,
    list: SyntaxKind,
    size: usize,
    marker: usize,
) -> BlockResult {
    if cx.parent_type() != list {
        cx.start_context(list, cx.line.base_pos, marker);
    }
    let new_base = list_indent(&cx.line, cx.line.pos + size);
    cx.start_context(
        SyntaxKind::LIST_ITEM,
        cx.line.base_pos,
        new_base - cx.line.base_indent,
    );
    let at = cx.line_start() + cx.line.pos;
    cx.add_node(SyntaxKind::LIST_MARK, at, at + size);
    cx.line.move_base_column(new_base);
    BlockResult::Container
}

pub(crate) fn atx_heading(cx: &mut BlockContext<'_>) -> BlockResult {
    let Some(size) = is_atx_heading(&cx.line) else {
        return BlockResult::Decline;
    };
    let Some(kind) = SyntaxKind::atx_heading(size) else {
        return BlockResult::Decline;
    };
    let line = &cx.line;
    let text = line.text;
    let off = line.pos;
    let from = cx.line_start() + off;
    let end_of_space = skip_space_back(text, text.len(), off);
    let mut after = end_of_space;
    while after > off && text.as_bytes()[after - 1] == b'#' {
        after -= 1;
    }
    if after == end_of_space || after == off || !is_space(text.as_bytes()[after - 1] as char) {
        after = text.len();
    }
    let mut children = vec![Element::leaf(SyntaxKind::HEADER_MARK, from, from + size)];
    let content_from = off + size + 1;
    if content_from < after {
        children.extend(
            cx.parser()
                .parse_inline(&text[content_from..after], cx.line_start() + content_from),
        );
    }
    if after < text.len() {
        children.push(Element::leaf(
            SyntaxKind::HEADER_MARK,
            cx.line_start() + after,
            cx.line_start() + end_of_space,
        ));
    }
    let to = cx.line_start() + text.len();
    cx.next_line();
    cx.add_element(Element::new(kind, from, to, children));
    BlockResult::Done
}

pub(crate) fn end_leaf_atx_heading(cx: &BlockContext<'_>, _: &LeafBlock) -> bool {
    is_atx_heading(&cx.line).is_some()
}

pub(crate) fn end_leaf_fenced_code(cx: &BlockContext<'_>, _: &LeafBlock) -> bool {
    is_fenced_code(&cx.line).is_some()
}

pub(crate) fn end_leaf_blockquote(cx: &BlockContext<'_>, _: &LeafBlock) -> bool {
    is_blockquote(&cx.line).is_some()
}

pub(crate) fn end_leaf_bullet_list(cx: &BlockContext<'_>, _: &LeafBlock) -> bool {
    is_bullet_list(cx, true).is_some()
}

pub(crate) fn end_leaf_ordered_list(cx: &BlockContext<'_>, _: &LeafBlock) -> bool {
    is_ordered_list(cx, true).is_some()
}

pub(crate) fn end_leaf_horizontal_rule(cx: &BlockContext<'_>, _: &LeafBlock) -> bool {
    is_horizontal_rule(cx, true)
}

pub(crate) fn setext_heading(_: &BlockContext<'_>, _: &LeafBlock) -> Option<LeafParser> {
    Some(LeafParser::SetextHeading)
}

pub(crate) fn setext_heading_next_line(cx: &mut BlockContext<'_>, leaf: &LeafBlock) -> bool {
    if cx.line.depth < cx.depth() {
        return false;
    }
    let Some(underline) = is_setext_underline(&cx.line) else {
        return false;
    };
    let kind = if cx.line.next == Some('=') {
        SyntaxKind::SETEXT_HEADING1
    } else {
        SyntaxKind::SETEXT_HEADING2
    };
    let mark = Element::leaf(
        SyntaxKind::HEADER_MARK,
        cx.line_start() + cx.line.pos,
        cx.line_start() + underline,
    );
    let underline_marks = std::mem::take(&mut cx.line.markers);
    cx.next_line();
    let mut children = cx.parser().parse_inline(&leaf.content, leaf.start);
    children.extend(underline_marks);
    children.push(mark);
    let to = cx.prev_line_end();
    cx.add_leaf_element(leaf, Element::new(kind, leaf.start, to, children));
    true
}

pub(crate) fn link_reference(_: &BlockContext<'_>, leaf: &LeafBlock) -> Option<LeafParser> {
    leaf.content.starts_with('[').then_some(LeafParser::LinkReference)
}

/// Children of a `[label]: destination` definition spanning all of
/// `content`, or `None` when `content` is anything else.
fn link_reference_parts(content: &str, start: usize) -> Option<Vec<Element>> {
    let label = parse_link_label(content, 0, start, true)?;
    let colon = label.to - start;
    if content.as_bytes().get(colon) != Some(&b':') {
        return None;
    }
    let rest = &content[colon + 1..];
    let url_from = colon + 1 + (rest.len() - rest.trim_start_matches([' ', '\t']).len());
    let url_len = content[url_from..]
        .find(char::is_whitespace)
        .unwrap_or(content.len() - url_from);
    if url_len == 0 || !content[url_from + url_len..].trim().is_empty() {
        return None;
    }
    Some(vec![
        label,
        Element::leaf(SyntaxKind::LINK_MARK, start + colon, start + colon + 1),
        Element::leaf(SyntaxKind::URL, start + url_from, start + url_from + url_len),
    ])
}

fn complete_link_reference(cx: &mut BlockContext<'_>, leaf: &LeafBlock) -> bool {
    let Some(children) = link_reference_parts(&leaf.content, leaf.start) else {
        return false;
    };
    let element = Element::new(
        SyntaxKind::LINK_REFERENCE,
        leaf.start,
        leaf.start + leaf.content.len(),
        children,
    );
    cx.add_leaf_element(leaf, element);
    true
}

pub(crate) fn link_reference_next_line(cx: &mut BlockContext<'_>, leaf: &LeafBlock) -> bool {
    !leaf.content.contains('\n') && complete_link_reference(cx, leaf)
}

pub(crate) fn link_reference_finish(cx: &mut BlockContext<'_>, leaf: &LeafBlock) -> bool {
    complete_link_reference(cx, leaf)
}

#[cfg(test)]
mod tests {
    use crate::parser::MarkdownParser;
    use crate::test_support::render_with;
    use insta::assert_snapshot;

    fn render(input: &str) -> String {
        render_with(&MarkdownParser::default(), input)
    }

    #[test]
    fn atx_headings() {
        assert_snapshot!(render("# Title"), @"{ATX_HEADING1:{HEADER_MARK:#} Title}");
        assert_snapshot!(render("### Three ###"), @"{ATX_HEADING3:{HEADER_MARK:###} Three {HEADER_MARK:###}}");
        assert_snapshot!(render("#hashless"), @"{PARAGRAPH:#hashless}");
        assert_snapshot!(render("####### seven"), @"{PARAGRAPH:####### seven}");
    }

    #[test]
    fn setext_headings() {
        assert_snapshot!(render("Title\n==="), @r"{SETEXT_HEADING1:Title\n{HEADER_MARK:===}}");
        assert_snapshot!(render("Title\n---"), @r"{SETEXT_HEADING2:Title\n{HEADER_MARK:---}}");
    }

    #[test]
    fn setext_underline_keeps_quote_mark() {
        assert_snapshot!(
            render("> a\n> ---"),
            @r"{BLOCKQUOTE:{QUOTE_MARK:>} {SETEXT_HEADING2:a\n{QUOTE_MARK:>} {HEADER_MARK:---}}}"
        );
    }

    #[test]
    fn horizontal_rules() {
        assert_snapshot!(render("---"), @"{HORIZONTAL_RULE:---}");
        assert_snapshot!(render("* * *"), @"{HORIZONTAL_RULE:* * *}");
        assert_snapshot!(render("para\n\n___\n"), @r"{PARAGRAPH:para}\n\n{HORIZONTAL_RULE:___}\n");
    }

    #[test]
    fn bullet_list_items() {
        assert_snapshot!(
            render("- one\n- two"),
            @r"{BULLET_LIST:{LIST_ITEM:{LIST_MARK:-} {PARAGRAPH:one}}\n{LIST_ITEM:{LIST_MARK:-} {PARAGRAPH:two}}}"
        );
    }

    #[test]
    fn nested_bullet_lists() {
        assert_snapshot!(
            render("- one\n  - two"),
            @r"{BULLET_LIST:{LIST_ITEM:{LIST_MARK:-} {PARAGRAPH:one}\n  {BULLET_LIST:{LIST_ITEM:{LIST_MARK:-} {PARAGRAPH:two}}}}}"
        );
    }

    #[test]
    fn ordered_list_items() {
        assert_snapshot!(
            render("1. one\n2) two"),
            @r"{ORDERED_LIST:{LIST_ITEM:{LIST_MARK:1.} {PARAGRAPH:one}}}\n{ORDERED_LIST:{LIST_ITEM:{LIST_MARK:2)} {PARAGRAPH:two}}}"
        );
    }

    #[test]
    fn fenced_code_blocks() {
        assert_snapshot!(
            render("```rust\nfn main() {}\n```\nafter"),
            @r"{FENCED_CODE:{CODE_MARK:```}{CODE_INFO:rust}\n{CODE_TEXT:fn main() {}}\n{CODE_MARK:```}}\n{PARAGRAPH:after}"
        );
        assert_snapshot!(
            render("~~~\nopen"),
            @r"{FENCED_CODE:{CODE_MARK:~~~}\n{CODE_TEXT:open}}"
        );
    }

    #[test]
    fn link_reference_definitions() {
        assert_snapshot!(
            render("[home]: https://example.com"),
            @"{LINK_REFERENCE:{LINK_LABEL:[home]}{LINK_MARK::} {URL:https://example.com}}"
        );
        assert_snapshot!(render("[home]: two words"), @"{PARAGRAPH:{LINK:{LINK_MARK:[}home{LINK_MARK:]}}: two words}");
    }

    #[test]
    fn link_reference_ends_at_next_line() {
        assert_snapshot!(
            render("[a]: /x\ntext"),
            @r"{LINK_REFERENCE:{LINK_LABEL:[a]}{LINK_MARK::} {URL:/x}}\n{PARAGRAPH:text}"
        );
    }
}
