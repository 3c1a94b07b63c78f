//! Compact tree rendering for unit tests.
//!
//! `{KIND:...}` wraps each element; uncovered input appears verbatim between
//! them. Newlines are written as `\n` so a whole tree fits on one line.

use crate::element::Element;
use crate::extensions;
use crate::parser::MarkdownParser;

pub(crate) fn render_with(parser: &MarkdownParser, input: &str) -> String {
    let doc = parser.parse(input);
    let mut out = String::new();
    render_children(input, &doc.children, doc.from, doc.to, &mut out);
    out
}

/// Render with every extension enabled.
pub(crate) fn render(input: &str) -> String {
    render_with(extensions::parser(), input)
}

fn render_children(input: &str, children: &[Element], from: usize, to: usize, out: &mut String) {
    let mut pos = from;
    for child in children {
        push_text(input, pos, child.from, out);
        out.push('{');
        out.push_str(&format!("{:?}:", child.kind));
        render_children(input, &child.children, child.from, child.to, out);
        out.push('}');
        pos = pos.max(child.to);
    }
    push_text(input, pos, to, out);
}

fn push_text(input: &str, from: usize, to: usize, out: &mut String) {
    if from < to {
        out.push_str(&input.get(from..to).unwrap_or("").replace('\n', "\\n"));
    }
}
