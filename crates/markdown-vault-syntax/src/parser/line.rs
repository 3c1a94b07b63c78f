//! The current line under the block cursor.
//!
//! Container markup (`>` and list indentation) is consumed before block
//! parsers see the line. `base_pos`/`base_indent` record where the container
//! prefix ends; `pos`/`indent` point at the first non-space character after
//! it.

use std::borrow::Cow;

use crate::element::Element;

/// Whitespace as far as block structure is concerned.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// First position at or after `from` that is not whitespace.
pub fn skip_space(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() && is_space(bytes[i] as char) {
        i += 1;
    }
    i
}

/// Position just after the last non-whitespace character before `end`,
/// never moving below `to`.
pub fn skip_space_back(text: &str, end: usize, to: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = end.min(bytes.len());
    while i > to && is_space(bytes[i - 1] as char) {
        i -= 1;
    }
    i
}

#[derive(Debug, Clone, Default)]
pub struct Line<'a> {
    /// Full text of the line, without its line break.
    pub text: &'a str,
    /// Column where the innermost matched container's content starts.
    pub base_indent: usize,
    /// Byte offset matching `base_indent`.
    pub base_pos: usize,
    /// Number of open containers whose markup this line continued.
    pub depth: usize,
    /// Container marks (such as `>`) found while continuing contexts.
    pub markers: Vec<Element>,
    /// First non-space position after the container prefix.
    pub pos: usize,
    /// Column of `pos`.
    pub indent: usize,
    /// Character at `pos`, `None` at the end of the line.
    pub next: Option<char>,
}

impl<'a> Line<'a> {
    pub(crate) fn reset(&mut self, text: &'a str) {
        self.text = text;
        self.base_indent = 0;
        self.base_pos = 0;
        self.pos = 0;
        self.indent = 0;
        self.forward_inner();
        self.depth = 1;
        self.markers.clear();
    }

    /// Skip to the content after `base_pos` if the cursor is behind it.
    pub fn forward(&mut self) {
        if self.base_pos > self.pos {
            self.forward_inner();
        }
    }

    fn forward_inner(&mut self) {
        let new_pos = self.skip_space(self.base_pos);
        self.move_to(new_pos);
    }

    /// Put the cursor at `pos`, keeping `indent` and `next` in step.
    pub fn move_to(&mut self, pos: usize) {
        let pos = pos.min(self.text.len());
        if pos >= self.pos {
            self.indent = self.count_indent(pos, self.pos, self.indent);
        } else {
            self.indent = self.count_indent(pos, 0, 0);
        }
        self.pos = pos;
        self.next = self.text.get(pos..).and_then(|rest| rest.chars().next());
    }

    pub fn skip_space(&self, from: usize) -> usize {
        skip_space(self.text, from)
    }

    /// Move the container boundary to byte offset `to`.
    pub fn move_base(&mut self, to: usize) {
        self.base_pos = to;
        self.base_indent = self.count_indent(to, self.pos, self.indent);
    }

    /// Move the container boundary to column `indent`.
    pub fn move_base_column(&mut self, indent: usize) {
        self.base_indent = indent;
        self.base_pos = self.find_column(indent);
    }

    pub fn add_marker(&mut self, element: Element) {
        self.markers.push(element);
    }

    /// Column reached at byte `to`, counting from byte `from` at column `indent`.
    /// Tabs advance to the next multiple of four.
    pub fn count_indent(&self, to: usize, from: usize, indent: usize) -> usize {
        let bytes = self.text.as_bytes();
        let mut indent = indent;
        for &b in bytes.iter().take(to.min(bytes.len())).skip(from) {
            indent += if b == b'\t' { 4 - indent % 4 } else { 1 };
        }
        indent
    }

    /// Byte offset at which column `goal` is reached.
    pub fn find_column(&self, goal: usize) -> usize {
        let bytes = self.text.as_bytes();
        let mut i = 0;
        let mut indent = 0;
        while i < bytes.len() && indent < goal {
            indent += if bytes[i] == b'\t' { 4 - indent % 4 } else { 1 };
            i += 1;
        }
        i
    }

    /// The line with its container prefix blanked out, keeping byte offsets
    /// aligned with the source.
    pub fn scrub(&self) -> Cow<'a, str> {
        if self.base_indent == 0 {
            return Cow::Borrowed(self.text);
        }
        let base = self.base_pos.min(self.text.len());
        let mut scrubbed = " ".repeat(base);
        scrubbed.push_str(self.text.get(base..).unwrap_or(""));
        Cow::Owned(scrubbed)
    }

    /// Text from the cursor to the end of the line.
    pub fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or("")
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn line(text: &str) -> Line<'_> {
        let mut line = Line::default();
        line.reset(text);
        line
    }

    #[rstest]
    #[case("abc", 0, 0, Some('a'))]
    #[case("   abc", 3, 3, Some('a'))]
    #[case("\tabc", 1, 4, Some('a'))]
    #[case(" \tabc", 2, 4, Some('a'))]
    #[case("    ", 4, 4, None)]
    fn reset_skips_leading_space(
        #[case] text: &str,
        #[case] pos: usize,
        #[case] indent: usize,
        #[case] next: Option<char>,
    ) {
        let line = line(text);
        assert_eq!(line.pos, pos);
        assert_eq!(line.indent, indent);
        assert_eq!(line.next, next);
        assert_eq!(line.depth, 1);
    }

    #[test]
    fn move_base_column_finds_byte_offset() {
        let mut line = line("    - item");
        line.move_base_column(2);
        assert_eq!(line.base_pos, 2);
        assert_eq!(line.base_indent, 2);
    }

    #[test]
    fn forward_moves_past_base() {
        let mut line = line("> quoted");
        line.move_base(2);
        line.forward();
        assert_eq!(line.pos, 2);
        assert_eq!(line.next, Some('q'));
    }

    #[test]
    fn scrub_blanks_container_prefix() {
        let mut line = line("> > text");
        line.move_base(4);
        assert_eq!(line.scrub(), "    text");
    }

    #[test]
    fn scrub_without_base_borrows() {
        let line = line("plain");
        assert!(matches!(line.scrub(), Cow::Borrowed("plain")));
    }

    #[test]
    fn move_to_updates_next_and_indent() {
        let mut line = line("%%a%% tail");
        line.move_to(6);
        assert_eq!(line.next, Some('t'));
        assert_eq!(line.indent, 6);
        assert_eq!(line.rest(), "tail");
    }

    #[test]
    fn skip_space_back_stops_at_bound() {
        assert_eq!(skip_space_back("ab   ", 5, 0), 2);
        assert_eq!(skip_space_back("     ", 5, 3), 3);
    }
}
