//! Wiki-style internal links and embeds.
//!
//! ```text
//! [[ path #subpath | display ]]
//! ![[ path ]]
//! ```
//!
//! A link needs a path, a subpath, or both. The `| display` part is
//! optional and may be empty.

use std::sync::OnceLock;

use regex::Regex;

use crate::element::Element;
use crate::parser::{InlineContext, InlineParserSpec, MarkdownConfig, Position};
use crate::syntax_kind::SyntaxKind;

fn path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\[\]|#^\\/]+").expect("valid regex"))
}

/// Whether `]]` follows the `[[` at `start` before any other `[[`, with
/// something in between.
fn is_closed_link(cx: &InlineContext<'_>, start: usize) -> bool {
    let rest = cx.slice(start + 2, cx.end()).as_bytes();
    for (i, pair) in rest.windows(2).enumerate() {
        match pair {
            b"[[" => return false,
            b"]]" => return i > 0,
            _ => {}
        }
    }
    false
}

/// Offset of the first `]]` at or after `from`, or of the first `|` as
/// well when `stop_at_pipe` is set.
fn find_terminator(cx: &InlineContext<'_>, from: usize, stop_at_pipe: bool) -> Option<usize> {
    let rest = cx.slice(from, cx.end()).as_bytes();
    (0..rest.len())
        .find(|&i| (stop_at_pipe && rest[i] == b'|') || rest[i..].starts_with(b"]]"))
        .map(|i| from + i)
}

fn parse_path(cx: &InlineContext<'_>, start: usize) -> Option<Element> {
    let found = path_regex().find(cx.slice(start, cx.end()))?;
    Some(Element::leaf(
        SyntaxKind::INTERNAL_PATH,
        start,
        start + found.end(),
    ))
}

fn parse_subpath(cx: &InlineContext<'_>, start: usize) -> Option<Element> {
    if cx.char(start) != Some('#') {
        return None;
    }
    let end = find_terminator(cx, start + 1, true)?;
    Some(Element::leaf(SyntaxKind::INTERNAL_SUBPATH, start, end))
}

fn parse_display(cx: &InlineContext<'_>, start: usize) -> Option<Element> {
    let end = find_terminator(cx, start, false)?;
    (end > start).then(|| Element::leaf(SyntaxKind::INTERNAL_DISPLAY, start, end))
}

/// Parse an internal link whose `[[` starts at `start`.
pub fn parse_internal_link(cx: &InlineContext<'_>, start: usize) -> Option<Element> {
    if cx.slice(start, start + 2) != "[[" || !is_closed_link(cx, start) {
        return None;
    }
    let mut contents = vec![Element::leaf(SyntaxKind::INTERNAL_MARK, start, start + 2)];
    let mut pos = cx.skip_space(start + 2);

    let path = parse_path(cx, pos);
    if let Some(path) = &path {
        pos = cx.skip_space(path.to);
        contents.push(path.clone());
    }
    let subpath = parse_subpath(cx, pos);
    if let Some(subpath) = &subpath {
        pos = cx.skip_space(subpath.to);
        contents.push(subpath.clone());
    }
    if path.is_none() && subpath.is_none() {
        return None;
    }

    if cx.char(pos) == Some('|') {
        contents.push(Element::leaf(SyntaxKind::INTERNAL_MARK, pos, pos + 1));
        pos += 1;
        if let Some(display) = parse_display(cx, pos) {
            pos = cx.skip_space(display.to);
            contents.push(display);
        }
    }

    // Anything left before `]]` (such as `/` after a path) is not a link.
    if cx.slice(pos, pos + 2) != "]]" {
        return None;
    }
    contents.push(Element::leaf(SyntaxKind::INTERNAL_MARK, pos, pos + 2));
    Some(Element::new(SyntaxKind::INTERNAL_LINK, start, pos + 2, contents))
}

fn parse_link(cx: &mut InlineContext<'_>, next: char, pos: usize) -> Option<usize> {
    if next != '[' {
        return None;
    }
    let link = parse_internal_link(cx, pos)?;
    Some(cx.add_element(link))
}

fn parse_embed(cx: &mut InlineContext<'_>, next: char, pos: usize) -> Option<usize> {
    if next != '!' {
        return None;
    }
    let link = parse_internal_link(cx, pos + 1)?;
    let embed = Element::new(
        SyntaxKind::EMBED,
        pos,
        link.to,
        vec![Element::leaf(SyntaxKind::EMBED_MARK, pos, pos + 1), link],
    );
    Some(cx.add_element(embed))
}

pub const INTERNAL_LINK: MarkdownConfig = MarkdownConfig {
    name: "internal-link",
    define_nodes: &[
        SyntaxKind::EMBED,
        SyntaxKind::EMBED_MARK,
        SyntaxKind::INTERNAL_LINK,
        SyntaxKind::INTERNAL_MARK,
        SyntaxKind::INTERNAL_PATH,
        SyntaxKind::INTERNAL_SUBPATH,
        SyntaxKind::INTERNAL_DISPLAY,
    ],
    parse_block: &[],
    parse_inline: &[
        InlineParserSpec {
            name: "InternalLink",
            parse: parse_link,
            position: Some(Position::Before("Link")),
        },
        InlineParserSpec {
            name: "Embed",
            parse: parse_embed,
            position: Some(Position::Before("Image")),
        },
    ],
};

#[cfg(test)]
mod tests {
    use crate::test_support::render;
    use insta::assert_snapshot;
    use rstest::rstest;

    #[rstest]
    #[case("[[]]")]
    #[case("[[ ]]")]
    #[case("[[a]")]
    #[case("[[open")]
    #[case("[[a/b]]")]
    #[case("[[|x]]")]
    fn not_internal_links(#[case] input: &str) {
        assert!(!render(input).contains("INTERNAL_LINK"), "{}", render(input));
    }

    #[test]
    fn whitespace_around_path_is_skipped() {
        assert_snapshot!(
            render("[[ note ]]"),
            @"{PARAGRAPH:{INTERNAL_LINK:{INTERNAL_MARK:[[} {INTERNAL_PATH:note }{INTERNAL_MARK:]]}}}"
        );
    }

    #[test]
    fn subpath_only() {
        assert_snapshot!(
            render("[[#Heading]]"),
            @"{PARAGRAPH:{INTERNAL_LINK:{INTERNAL_MARK:[[}{INTERNAL_SUBPATH:#Heading}{INTERNAL_MARK:]]}}}"
        );
    }

    #[test]
    fn empty_display() {
        assert_snapshot!(
            render("[[a|]]"),
            @"{PARAGRAPH:{INTERNAL_LINK:{INTERNAL_MARK:[[}{INTERNAL_PATH:a}{INTERNAL_MARK:|}{INTERNAL_MARK:]]}}}"
        );
    }

    #[test]
    fn embed_wraps_link() {
        assert_snapshot!(
            render("![[pic.png|200]]"),
            @"{PARAGRAPH:{EMBED:{EMBED_MARK:!}{INTERNAL_LINK:{INTERNAL_MARK:[[}{INTERNAL_PATH:pic.png}{INTERNAL_MARK:|}{INTERNAL_DISPLAY:200}{INTERNAL_MARK:]]}}}}"
        );
    }
}
