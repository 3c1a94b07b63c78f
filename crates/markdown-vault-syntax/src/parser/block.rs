//! Line-oriented block parsing.
//!
//! [`BlockContext`] owns the line cursor and the stack of open containers.
//! Block rules and leaf parsers drive it through [`BlockContext::next_line`]
//! and add their results to the innermost open container.

use crate::element::{Element, inject_marks};
use crate::parser::grammar::block::{
    is_bullet_list, is_horizontal_rule, is_ordered_list,
};
use crate::parser::leaf::LeafParser;
use crate::parser::line::{Line, is_space};
use crate::parser::MarkdownParser;
use crate::syntax_kind::SyntaxKind;

/// What a block rule did with the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockResult {
    /// Not this rule's syntax; the next rule is tried.
    Decline,
    /// The rule added its block and moved the cursor past it.
    Done,
    /// The rule opened a container; block rules run again on the rest of the line.
    Container,
}

/// An open container (document, blockquote, list, list item).
#[derive(Debug)]
pub(crate) struct CompositeBlock {
    pub(crate) kind: SyntaxKind,
    /// Marker character for lists, content indent for list items.
    pub(crate) value: usize,
    pub(crate) from: usize,
    pub(crate) end: usize,
    pub(crate) children: Vec<Element>,
}

impl CompositeBlock {
    fn into_element(self, end: usize) -> Element {
        let end = self.children.last().map_or(end, |last| end.max(last.to));
        Element::new(self.kind, self.from, end, self.children)
    }
}

/// A paragraph-like block still being collected.
#[derive(Debug)]
pub struct LeafBlock {
    /// Document offset of the first content character.
    pub start: usize,
    /// Collected text; continuation lines are joined with `\n` and have
    /// their container prefix blanked out, so `start + i` is the document
    /// offset of byte `i`.
    pub content: String,
    /// Container marks from continuation lines.
    pub marks: Vec<Element>,
    pub parsers: Vec<LeafParser>,
}

impl LeafBlock {
    fn new(start: usize, content: String) -> Self {
        Self {
            start,
            content,
            marks: Vec::new(),
            parsers: Vec::new(),
        }
    }
}

pub struct BlockContext<'a> {
    parser: &'a MarkdownParser,
    input: &'a str,
    /// The line under the cursor.
    pub line: Line<'a>,
    line_start: usize,
    line_end: usize,
    at_end: bool,
    stack: Vec<CompositeBlock>,
    /// Set once front matter detection has run for this parse.
    pub checked_yaml: bool,
}

impl<'a> BlockContext<'a> {
    pub(crate) fn new(parser: &'a MarkdownParser, input: &'a str) -> Self {
        let mut cx = Self {
            parser,
            input,
            line: Line::default(),
            line_start: 0,
            line_end: 0,
            at_end: false,
            stack: vec![CompositeBlock {
                kind: SyntaxKind::DOCUMENT,
                value: 0,
                from: 0,
                end: 0,
                children: Vec::new(),
            }],
            checked_yaml: false,
        };
        cx.read_line();
        cx
    }

    pub(crate) fn run(mut self) -> Element {
        loop {
            if let Some(document) = self.advance() {
                return document;
            }
        }
    }

    pub fn parser(&self) -> &'a MarkdownParser {
        self.parser
    }

    /// The whole document being parsed.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Document offset of the current line's first byte.
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    /// Number of open containers, including the document.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Kind of the innermost open container.
    pub fn parent_type(&self) -> SyntaxKind {
        self.block().kind
    }

    pub(crate) fn in_list(&self, kind: SyntaxKind) -> bool {
        self.stack.iter().rev().any(|b| b.kind == kind)
    }

    fn block(&self) -> &CompositeBlock {
        &self.stack[self.stack.len() - 1]
    }

    fn block_mut(&mut self) -> &mut CompositeBlock {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Move to the next line. Returns false, leaving an empty line at the
    /// end of the input, when there is none.
    pub fn next_line(&mut self) -> bool {
        self.line_start += self.line.text.len();
        if self.line_end >= self.input.len() {
            self.at_end = true;
            self.read_line();
            false
        } else {
            self.line_start += 1;
            self.read_line();
            true
        }
    }

    /// Raw text of the line after the current one, container markup
    /// included. Empty at the end of the input.
    pub fn peek_line(&self) -> &'a str {
        let rest = self.input.get(self.line_end + 1..).unwrap_or("");
        &rest[..rest.find('\n').unwrap_or(rest.len())]
    }

    fn read_line(&mut self) {
        let rest = self.input.get(self.line_start..).unwrap_or("");
        let len = rest.find('\n').unwrap_or(rest.len());
        self.line_end = self.line_start + len;
        self.line.reset(&rest[..len]);
        while self.line.depth < self.stack.len() {
            if !self.skip_container_markup(self.line.depth) {
                break;
            }
            self.line.forward();
            self.line.depth += 1;
        }
    }

    /// Continue the container at `depth` on the current line, consuming
    /// its markup.
    fn skip_container_markup(&mut self, depth: usize) -> bool {
        match self.stack[depth].kind {
            SyntaxKind::BLOCKQUOTE => {
                if self.line.next != Some('>') {
                    return false;
                }
                let at = self.line_start + self.line.pos;
                self.line
                    .add_marker(Element::leaf(SyntaxKind::QUOTE_MARK, at, at + 1));
                let space_after = self
                    .line
                    .text
                    .as_bytes()
                    .get(self.line.pos + 1)
                    .is_some_and(|b| is_space(*b as char));
                self.line
                    .move_base(self.line.pos + if space_after { 2 } else { 1 });
                self.stack[depth].end = self.line_start + self.line.text.len();
                true
            }
            SyntaxKind::LIST_ITEM => {
                let value = self.stack[depth].value;
                if self.line.indent < self.line.base_indent + value && self.line.next.is_some() {
                    return false;
                }
                self.line.move_base_column(self.line.base_indent + value);
                true
            }
            SyntaxKind::BULLET_LIST | SyntaxKind::ORDERED_LIST => self.skip_for_list(depth),
            _ => true,
        }
    }

    fn skip_for_list(&self, depth: usize) -> bool {
        let line = &self.line;
        let list = &self.stack[depth];
        if line.at_end()
            || (depth + 1 < self.stack.len()
                && line.indent >= self.stack[depth + 1].value + line.base_indent)
        {
            return true;
        }
        if line.indent >= line.base_indent + 4 {
            return false;
        }
        let size = if list.kind == SyntaxKind::ORDERED_LIST {
            is_ordered_list(self, false)
        } else {
            is_bullet_list(self, false)
        };
        let Some(size) = size else {
            return false;
        };
        (list.kind != SyntaxKind::BULLET_LIST || !is_horizontal_rule(self, false))
            && line.text.as_bytes().get(line.pos + size - 1).map(|b| *b as usize)
                == Some(list.value)
    }

    /// Document offset of the end of the previous line.
    pub fn prev_line_end(&self) -> usize {
        if self.at_end {
            self.line_start
        } else {
            self.line_start.saturating_sub(1)
        }
    }

    /// Open a container starting at byte `start` of the current line.
    pub fn start_context(&mut self, kind: SyntaxKind, start: usize, value: usize) {
        let block = CompositeBlock {
            kind,
            value,
            from: self.line_start + start,
            end: self.line_start + self.line.text.len(),
            children: Vec::new(),
        };
        self.stack.push(block);
        self.line.depth = self.stack.len();
    }

    /// Add a childless element to the innermost container.
    pub fn add_node(&mut self, kind: SyntaxKind, from: usize, to: usize) {
        self.block_mut().children.push(Element::leaf(kind, from, to));
    }

    /// Add an element to the innermost container.
    pub fn add_element(&mut self, element: Element) {
        self.block_mut().children.push(element);
    }

    /// Add the element that replaces `leaf`, carrying over the container
    /// marks of its continuation lines.
    pub fn add_leaf_element(&mut self, leaf: &LeafBlock, mut element: Element) {
        let children = std::mem::take(&mut element.children);
        element.children = inject_marks(children, &leaf.marks);
        self.add_element(element);
    }

    fn finish_context(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        if let Some(block) = self.stack.pop() {
            let end = block.end;
            let element = block.into_element(end);
            self.add_element(element);
        }
    }

    fn finish(&mut self) -> Element {
        while self.stack.len() > 1 {
            self.finish_context();
        }
        let end = self.line_start;
        self.stack
            .drain(..)
            .next()
            .map(|document| document.into_element(end))
            .unwrap_or_else(|| Element::leaf(SyntaxKind::DOCUMENT, 0, end))
    }

    /// Turn a finished leaf into a paragraph unless one of its parsers
    /// claims it.
    fn finish_leaf(&mut self, mut leaf: LeafBlock) {
        let parsers = std::mem::take(&mut leaf.parsers);
        for parser in &parsers {
            if parser.finish(self, &leaf) {
                return;
            }
        }
        let inline = self.parser.parse_inline(&leaf.content, leaf.start);
        let children = inject_marks(inline, &leaf.marks);
        let end = leaf.start + leaf.content.len();
        self.add_element(Element::new(SyntaxKind::PARAGRAPH, leaf.start, end, children));
    }

    /// Parse one block. Returns the document once the input is exhausted.
    fn advance(&mut self) -> Option<Element> {
        loop {
            let mut mark = 0;
            loop {
                let open_end = (self.line.depth < self.stack.len()).then(|| self.block().end);
                while mark < self.line.markers.len()
                    && open_end.is_none_or(|end| self.line.markers[mark].from < end)
                {
                    let marker = self.line.markers[mark].clone();
                    mark += 1;
                    self.add_element(marker);
                }
                if open_end.is_none() {
                    break;
                }
                self.finish_context();
            }
            self.line.markers.clear();
            if !self.line.at_end() {
                break;
            }
            if !self.next_line() {
                return Some(self.finish());
            }
        }

        let parser = self.parser;
        'rules: loop {
            for parse in parser.block_parsers.iter().flatten() {
                match parse(self) {
                    BlockResult::Decline => {}
                    BlockResult::Done => return None,
                    BlockResult::Container => {
                        self.line.forward();
                        continue 'rules;
                    }
                }
            }
            break;
        }

        let mut leaf = LeafBlock::new(
            self.line_start + self.line.pos,
            self.line.rest().to_string(),
        );
        for start in parser.leaf_parsers.iter().flatten() {
            if let Some(leaf_parser) = start(self, &leaf) {
                leaf.parsers.push(leaf_parser);
            }
        }
        'lines: while self.next_line() {
            if self.line.at_end() {
                break;
            }
            if self.line.indent < self.line.base_indent + 4 {
                for stop in &parser.end_leaf {
                    if stop(self, &leaf) {
                        break 'lines;
                    }
                }
            }
            let mut parsers = std::mem::take(&mut leaf.parsers);
            for leaf_parser in &mut parsers {
                if leaf_parser.next_line(self, &leaf) {
                    return None;
                }
            }
            leaf.parsers = parsers;
            leaf.content.push('\n');
            leaf.content.push_str(&self.line.scrub());
            leaf.marks.extend(self.line.markers.iter().cloned());
        }
        self.finish_leaf(leaf);
        None
    }
}
