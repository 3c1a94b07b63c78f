//! Parsers that may turn a leaf block into something other than a paragraph.

use crate::extensions::table::{self, TableRows};
use crate::extensions::{footnote, task_list};
use crate::parser::block::{BlockContext, LeafBlock};
use crate::parser::grammar::block::{
    link_reference_finish, link_reference_next_line, setext_heading_next_line,
};

/// A parser attached to a leaf block when it starts.
///
/// Every variant is polled on each continuation line and, if none claimed
/// the block earlier, once more when the block ends. The first parser to
/// return true decides what the leaf becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafParser {
    /// `[label]: destination` on a single line.
    LinkReference,
    /// Text followed by a `===` or `---` underline.
    SetextHeading,
    /// `[^label]: body`; `label_end` is the document offset just past `]:`.
    FootnoteReference { label_end: usize },
    /// `[x] text` inside a list item; `marker_len` is the byte length of `[x]`.
    Task { marker_len: usize },
    /// A row with a `|`; rows collected so far once the alignment row matched.
    Table(TableRows),
}

impl LeafParser {
    /// Offer the current line. Returning true means the leaf was emitted and
    /// the current line has not been consumed into it.
    pub fn next_line(&mut self, cx: &mut BlockContext<'_>, leaf: &LeafBlock) -> bool {
        match self {
            Self::LinkReference => link_reference_next_line(cx, leaf),
            Self::SetextHeading => setext_heading_next_line(cx, leaf),
            Self::FootnoteReference { label_end } => footnote::next_line(cx, leaf, *label_end),
            Self::Task { .. } => false,
            Self::Table(rows) => {
                table::next_line(cx, leaf, rows);
                false
            }
        }
    }

    /// The leaf ended. Returning true means the leaf was emitted.
    pub fn finish(&self, cx: &mut BlockContext<'_>, leaf: &LeafBlock) -> bool {
        match self {
            Self::LinkReference => link_reference_finish(cx, leaf),
            Self::SetextHeading => false,
            Self::FootnoteReference { label_end } => footnote::complete(cx, leaf, *label_end),
            Self::Task { marker_len } => task_list::finish(cx, leaf, *marker_len),
            Self::Table(rows) => table::finish(cx, leaf, rows),
        }
    }
}
