//! GFM pipe tables.
//!
//! A paragraph whose first line contains an unescaped `|` becomes a table
//! when its second line is an alignment row (`| --- | :-: |`) with the same
//! number of cells. Every following line of the paragraph is a body row.

use std::sync::OnceLock;

use regex::Regex;

use crate::element::Element;
use crate::parser::{
    BlockContext, BlockParserSpec, LeafBlock, LeafParser, MarkdownConfig, MarkdownParser, Position,
};
use crate::syntax_kind::SyntaxKind;

fn delimiter_row() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\|?(\s*:?-+:?\s*\|)+(\s*:?-+:?\s*)?$").expect("valid regex")
    })
}

/// Table state carried by [`LeafParser::Table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRows {
    /// The second line has not been seen yet.
    Unchecked,
    NotTable,
    /// Header, alignment row and body rows so far.
    Rows(Vec<Element>),
}

enum Piece {
    Cell(usize, usize),
    Pipe(usize),
}

/// Split a row from byte `start` into cells and pipes, returning the cell
/// count. A leading pipe with nothing before it does not open a cell.
fn split_row(line: &str, start: usize) -> (usize, Vec<Piece>) {
    let mut count = 0;
    let mut first = true;
    let mut cell: Option<(usize, usize)> = None;
    let mut escaped = false;
    let mut pieces = Vec::new();
    for (i, &b) in line.as_bytes().iter().enumerate().skip(start) {
        if b == b'|' && !escaped {
            if !first || cell.is_some() {
                count += 1;
            }
            first = false;
            if let Some((from, to)) = cell.take() {
                pieces.push(Piece::Cell(from, to));
            }
            pieces.push(Piece::Pipe(i));
        } else if escaped || (b != b' ' && b != b'\t') {
            let from = cell.map_or(i, |(from, _)| from);
            cell = Some((from, i + 1));
        }
        escaped = !escaped && b == b'\\';
    }
    if let Some((from, to)) = cell {
        count += 1;
        pieces.push(Piece::Cell(from, to));
    }
    (count, pieces)
}

fn cell_count(line: &str, start: usize) -> usize {
    split_row(line, start).0
}

/// Cells and pipes of a row as elements; `offset` is the document offset of
/// `line`.
fn row_elements(parser: &MarkdownParser, line: &str, start: usize, offset: usize) -> Vec<Element> {
    split_row(line, start)
        .1
        .into_iter()
        .map(|piece| match piece {
            Piece::Cell(from, to) => Element::new(
                SyntaxKind::TABLE_CELL,
                offset + from,
                offset + to,
                parser.parse_inline(&line[from..to], offset + from),
            ),
            Piece::Pipe(at) => {
                Element::leaf(SyntaxKind::TABLE_DELIMITER, offset + at, offset + at + 1)
            }
        })
        .collect()
}

fn has_pipe(text: &str, start: usize) -> bool {
    let bytes = text.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'|' => return true,
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    false
}

fn start_table(_: &BlockContext<'_>, leaf: &LeafBlock) -> Option<LeafParser> {
    has_pipe(&leaf.content, 0).then_some(LeafParser::Table(TableRows::Unchecked))
}

pub(crate) fn next_line(cx: &BlockContext<'_>, leaf: &LeafBlock, rows: &mut TableRows) {
    let line = &cx.line;
    match rows {
        TableRows::Unchecked => {
            *rows = TableRows::NotTable;
            let text = line.rest();
            if !matches!(line.next, Some('-' | ':' | '|')) || !delimiter_row().is_match(text) {
                return;
            }
            if cell_count(&leaf.content, 0) != cell_count(text, 0) {
                return;
            }
            let header = row_elements(cx.parser(), &leaf.content, 0, leaf.start);
            let start = cx.line_start() + line.pos;
            *rows = TableRows::Rows(vec![
                Element::new(
                    SyntaxKind::TABLE_HEADER,
                    leaf.start,
                    leaf.start + leaf.content.len(),
                    header,
                ),
                Element::leaf(
                    SyntaxKind::TABLE_DELIMITER,
                    start,
                    cx.line_start() + line.text.len(),
                ),
            ]);
        }
        TableRows::Rows(rows) => {
            let cells = row_elements(cx.parser(), line.text, line.pos, cx.line_start());
            rows.push(Element::new(
                SyntaxKind::TABLE_ROW,
                cx.line_start() + line.pos,
                cx.line_start() + line.text.len(),
                cells,
            ));
        }
        TableRows::NotTable => {}
    }
}

pub(crate) fn finish(cx: &mut BlockContext<'_>, leaf: &LeafBlock, rows: &TableRows) -> bool {
    let TableRows::Rows(rows) = rows else {
        return false;
    };
    let table = Element::new(
        SyntaxKind::TABLE,
        leaf.start,
        leaf.start + leaf.content.len(),
        rows.clone(),
    );
    cx.add_leaf_element(leaf, table);
    true
}

/// A row followed by a matching alignment row interrupts a paragraph.
fn end_leaf(cx: &BlockContext<'_>, leaf: &LeafBlock) -> bool {
    let line = &cx.line;
    if leaf.parsers.iter().any(|p| matches!(p, LeafParser::Table(_)))
        || !has_pipe(line.text, line.base_pos)
    {
        return false;
    }
    let next = cx.peek_line();
    delimiter_row().is_match(next)
        && cell_count(line.text, line.base_pos) == cell_count(next, line.base_pos)
}

pub const TABLE: MarkdownConfig = MarkdownConfig {
    name: "table",
    define_nodes: &[
        SyntaxKind::TABLE,
        SyntaxKind::TABLE_HEADER,
        SyntaxKind::TABLE_ROW,
        SyntaxKind::TABLE_CELL,
        SyntaxKind::TABLE_DELIMITER,
    ],
    parse_block: &[BlockParserSpec {
        name: "Table",
        parse: None,
        leaf: Some(start_table),
        end_leaf: Some(end_leaf),
        position: Some(Position::Before("SetextHeading")),
    }],
    parse_inline: &[],
};
