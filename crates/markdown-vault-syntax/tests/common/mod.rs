//! Bracket notation for expected trees.
//!
//! `{P:some {M:{mm:==}text{mm:==}}}` describes both the input (`some ==text==`)
//! and the elements the parser must produce for it. Aliases keep the
//! expectations short enough to line up with the input.

#![allow(dead_code)]

use markdown_vault_syntax::{Element, MarkdownParser, SyntaxKind, extensions};
use pretty_assertions::assert_eq;

fn kind_for(alias: &str) -> Option<SyntaxKind> {
    use SyntaxKind::*;
    let kind = match alias {
        "P" => PARAGRAPH,
        "Q" => BLOCKQUOTE,
        "q" => QUOTE_MARK,
        "BL" => BULLET_LIST,
        "OL" => ORDERED_LIST,
        "LI" => LIST_ITEM,
        "l" => LIST_MARK,
        "H1" => ATX_HEADING1,
        "H2" => ATX_HEADING2,
        "H3" => ATX_HEADING3,
        "SH1" => SETEXT_HEADING1,
        "SH2" => SETEXT_HEADING2,
        "h" => HEADER_MARK,
        "HR" => HORIZONTAL_RULE,
        "CB" => FENCED_CODE,
        "c" => CODE_MARK,
        "cI" => CODE_INFO,
        "cT" => CODE_TEXT,
        "IC" => INLINE_CODE,
        "LR" => LINK_REFERENCE,
        "LL" => LINK_LABEL,
        "U" => URL,
        "Ln" => LINK,
        "Im" => IMAGE,
        "L" => LINK_MARK,
        "Em" => EMPHASIS,
        "St" => STRONG_EMPHASIS,
        "e" => EMPHASIS_MARK,
        "Esc" => ESCAPE,
        "S" => STRIKETHROUGH,
        "s" => STRIKETHROUGH_MARK,
        "TB" => TABLE,
        "TH" => TABLE_HEADER,
        "TR" => TABLE_ROW,
        "TC" => TABLE_CELL,
        "td" => TABLE_DELIMITER,
        "T" => TASK,
        "t" => TASK_MARKER,
        "C" => COMMENT,
        "cm" => COMMENT_MARKER,
        "EM" => EMBED,
        "eM" => EMBED_MARK,
        "FN" => FOOTNOTE,
        "fM" => FOOTNOTE_MARK,
        "fL" => FOOTNOTE_LABEL,
        "FR" => FOOTNOTE_REFERENCE,
        "H" => HASHTAG,
        "hm" => HASHTAG_MARK,
        "hl" => HASHTAG_LABEL,
        "IL" => INTERNAL_LINK,
        "iM" => INTERNAL_MARK,
        "iP" => INTERNAL_PATH,
        "iS" => INTERNAL_SUBPATH,
        "iD" => INTERNAL_DISPLAY,
        "M" => MARK,
        "mm" => MARK_MARKER,
        "XB" => TEX_BLOCK,
        "XI" => TEX_INLINE,
        "xm" => TEX_MARKER,
        "YF" => YAML_FRONT_MATTER,
        "ym" => YAML_MARKER,
        "yc" => YAML_CONTENT,
        _ => return None,
    };
    Some(kind)
}

/// Split a bracket-notation string into the document text and the expected
/// top-level elements.
pub fn parse_marked(marked: &str) -> (String, Vec<Element>) {
    let mut doc = String::new();
    let mut stack: Vec<(SyntaxKind, usize, Vec<Element>)> =
        vec![(SyntaxKind::DOCUMENT, 0, Vec::new())];
    let mut rest = marked;
    while let Some(c) = rest.chars().next() {
        match c {
            '{' => {
                let colon = rest.find(':').expect("node alias ends with ':'");
                let alias = &rest[1..colon];
                let kind = kind_for(alias).unwrap_or_else(|| panic!("unknown alias {alias:?}"));
                stack.push((kind, doc.len(), Vec::new()));
                rest = &rest[colon + 1..];
            }
            '}' => {
                let (kind, from, children) = stack.pop().expect("balanced braces");
                let parent = stack.last_mut().expect("unbalanced '}'");
                parent.2.push(Element::new(kind, from, doc.len(), children));
                rest = &rest[1..];
            }
            _ => {
                doc.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    assert_eq!(stack.len(), 1, "unclosed node");
    let (_, _, children) = stack.pop().expect("document");
    (doc, children)
}

/// The marked string with its markup removed.
pub fn strip(marked: &str) -> String {
    parse_marked(marked).0
}

/// Parse the marked document with every extension and compare the trees.
pub fn check(marked: &str) {
    check_with(extensions::parser(), marked);
}

pub fn check_with(parser: &MarkdownParser, marked: &str) {
    let (doc, expected) = parse_marked(marked);
    let tree = parser.parse(&doc);
    assert_eq!(tree.kind, SyntaxKind::DOCUMENT);
    assert_eq!((tree.from, tree.to), (0, doc.len()), "document: {doc:?}");
    assert_eq!(tree.children, expected, "document: {doc:?}");
}
