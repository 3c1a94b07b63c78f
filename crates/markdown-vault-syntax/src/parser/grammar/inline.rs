//! # Inline-Level Grammar
//!
//! Host inline rules:
//!
//! - **Escape**: `\` before ASCII punctuation
//! - **InlineCode**: backtick runs closed by a run of the same length
//! - **Emphasis**: `*` and `_` runs, pushed as delimiters with flanking rules
//! - **Link** / **Image**: `[` and `![` push link-start delimiters
//! - **LinkEnd**: `]` closes the nearest active link start, followed by an
//!   optional `(destination)` or `[label]`
//!
//! Rules that do not match return `None`; the character is then plain text.

use std::sync::OnceLock;

use regex::Regex;

use crate::element::Element;
use crate::parser::inline::{
    EMPHASIS_ASTERISK, EMPHASIS_UNDERSCORE, IMAGE_START, InlineContext, LINK_START, Part,
};
use crate::parser::line::is_space;
use crate::syntax_kind::SyntaxKind;

fn unicode_punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\p{P}\p{S}]$").expect("valid regex"))
}

/// Punctuation for delimiter flanking: ASCII punctuation plus Unicode
/// punctuation and symbol categories.
pub(crate) fn is_punctuation(c: char) -> bool {
    let mut buf = [0; 4];
    c.is_ascii_punctuation() || unicode_punctuation().is_match(c.encode_utf8(&mut buf))
}

/// Whether the delimiter run between `from` and `to` can open and close,
/// judged by the characters around it.
pub(crate) fn flanking(
    cx: &InlineContext<'_>,
    from: usize,
    to: usize,
    asterisk: bool,
) -> (bool, bool) {
    let before = cx.char_before(from).unwrap_or('\n');
    let after = cx.char(to).unwrap_or('\n');
    let (p_before, p_after) = (is_punctuation(before), is_punctuation(after));
    let (s_before, s_after) = (before.is_whitespace(), after.is_whitespace());
    let left = !s_after && (!p_after || s_before || p_before);
    let right = !s_before && (!p_before || s_after || p_after);
    let can_open = left && (asterisk || !right || p_before);
    let can_close = right && (asterisk || !left || p_after);
    (can_open, can_close)
}

pub(crate) fn escape(cx: &mut InlineContext<'_>, next: char, pos: usize) -> Option<usize> {
    if next != '\\' || !cx.char(pos + 1).is_some_and(|c| c.is_ascii_punctuation()) {
        return None;
    }
    Some(cx.add_element(Element::leaf(SyntaxKind::ESCAPE, pos, pos + 2)))
}

pub(crate) fn inline_code(cx: &mut InlineContext<'_>, next: char, start: usize) -> Option<usize> {
    if next != '`' || cx.char_before(start) == Some('`') {
        return None;
    }
    let text = cx.text().as_bytes();
    let base = cx.offset();
    let mut pos = start + 1 - base;
    while text.get(pos) == Some(&b'`') {
        pos += 1;
    }
    let size = pos + base - start;
    let mut run = 0;
    while pos < text.len() {
        if text[pos] == b'`' {
            run += 1;
            if run == size && text.get(pos + 1) != Some(&b'`') {
                let end = pos + 1 + base;
                return Some(cx.add_element(Element::new(
                    SyntaxKind::INLINE_CODE,
                    start,
                    end,
                    vec![
                        Element::leaf(SyntaxKind::CODE_MARK, start, start + size),
                        Element::leaf(SyntaxKind::CODE_MARK, end - size, end),
                    ],
                )));
            }
        } else {
            run = 0;
        }
        pos += 1;
    }
    None
}

pub(crate) fn emphasis(cx: &mut InlineContext<'_>, next: char, start: usize) -> Option<usize> {
    if next != '*' && next != '_' {
        return None;
    }
    let mut pos = start + 1;
    while cx.char(pos) == Some(next) {
        pos += 1;
    }
    let asterisk = next == '*';
    let (can_open, can_close) = flanking(cx, start, pos, asterisk);
    let kind = if asterisk {
        EMPHASIS_ASTERISK
    } else {
        EMPHASIS_UNDERSCORE
    };
    Some(cx.add_delimiter(kind, start, pos, can_open, can_close))
}

pub(crate) fn link(cx: &mut InlineContext<'_>, next: char, start: usize) -> Option<usize> {
    (next == '[').then(|| cx.add_delimiter(LINK_START, start, start + 1, true, false))
}

pub(crate) fn image(cx: &mut InlineContext<'_>, next: char, start: usize) -> Option<usize> {
    (next == '!' && cx.char(start + 1) == Some('['))
        .then(|| cx.add_delimiter(IMAGE_START, start, start + 2, true, false))
}

pub(crate) fn link_end(cx: &mut InlineContext<'_>, next: char, start: usize) -> Option<usize> {
    if next != ']' {
        return None;
    }
    let (i, open) = cx.parts.iter().enumerate().rev().find_map(|(i, part)| match part {
        Some(Part::Delimiter(d)) if d.kind == LINK_START || d.kind == IMAGE_START => Some((i, *d)),
        _ => None,
    })?;
    let empty = cx.skip_space(open.to) == start
        && !matches!(cx.char(start + 1), Some('(' | '['));
    if !open.is_active() || empty {
        cx.parts[i] = None;
        return None;
    }
    let content = cx.take_content(i);
    let kind = if open.kind == LINK_START {
        SyntaxKind::LINK
    } else {
        SyntaxKind::IMAGE
    };
    let link = finish_link(cx, content, kind, open.from, start + 1);
    let to = cx.add_element(link);
    if kind == SyntaxKind::LINK {
        // Links may not contain other links.
        for part in cx.parts.iter_mut().flatten() {
            if let Part::Delimiter(d) = part
                && d.kind == LINK_START
            {
                d.can_open = false;
                d.can_close = false;
            }
        }
    }
    Some(to)
}

/// Wrap `content` in a link element spanning `start` to the `]` ending just
/// before `after_bracket`, then consume a trailing destination or label.
fn finish_link(
    cx: &InlineContext<'_>,
    mut content: Vec<Element>,
    kind: SyntaxKind,
    start: usize,
    after_bracket: usize,
) -> Element {
    let open_len = if kind == SyntaxKind::IMAGE { 2 } else { 1 };
    content.insert(0, Element::leaf(SyntaxKind::LINK_MARK, start, start + open_len));
    content.push(Element::leaf(
        SyntaxKind::LINK_MARK,
        after_bracket - 1,
        after_bracket,
    ));
    let mut end = after_bracket;
    match cx.char(after_bracket) {
        Some('(') => {
            let url_from = cx.skip_space(after_bracket + 1);
            let mut url_to = url_from;
            while let Some(c) = cx.char(url_to) {
                if is_space(c) || c == ')' {
                    break;
                }
                url_to += c.len_utf8();
            }
            let close = cx.skip_space(url_to);
            if cx.char(close) == Some(')') {
                content.push(Element::leaf(
                    SyntaxKind::LINK_MARK,
                    after_bracket,
                    after_bracket + 1,
                ));
                if url_from < url_to {
                    content.push(Element::leaf(SyntaxKind::URL, url_from, url_to));
                }
                content.push(Element::leaf(SyntaxKind::LINK_MARK, close, close + 1));
                end = close + 1;
            }
        }
        Some('[') => {
            if let Some(label) =
                parse_link_label(cx.text(), after_bracket - cx.offset(), cx.offset(), false)
            {
                end = label.to;
                content.push(label);
            }
        }
        _ => {}
    }
    Element::new(kind, start, end, content)
}

/// Parse a `[label]` whose `[` is at byte `start` of `text`; `offset` is
/// the document offset of `text`. With `require_non_ws` set, labels made
/// only of whitespace are rejected.
pub(crate) fn parse_link_label(
    text: &str,
    start: usize,
    offset: usize,
    require_non_ws: bool,
) -> Option<Element> {
    let bytes = text.as_bytes();
    let mut require_non_ws = require_non_ws;
    let mut escaped = false;
    let end = bytes.len().min(start + 1000);
    for (i, &b) in bytes.iter().enumerate().take(end).skip(start + 1) {
        if escaped {
            escaped = false;
        } else if b == b']' {
            return (!require_non_ws)
                .then(|| Element::leaf(SyntaxKind::LINK_LABEL, start + offset, i + 1 + offset));
        } else {
            if require_non_ws && !is_space(b as char) {
                require_non_ws = false;
            }
            match b {
                b'[' => return None,
                b'\\' => escaped = true,
                _ => {}
            }
        }
    }
    None
}
