//! Blocks fenced by a two-character marker that may span lines and may be
//! closed mid-line (`%%` comments, `$$` math).

use log::debug;
use regex::Regex;

use crate::element::Element;
use crate::parser::{BlockContext, BlockResult};
use crate::syntax_kind::SyntaxKind;

pub(super) struct MarkedBlock {
    pub(super) marker: &'static str,
    pub(super) kind: SyntaxKind,
    pub(super) mark: SyntaxKind,
    /// Matches an unescaped closing marker.
    pub(super) close: fn() -> &'static Regex,
}

impl MarkedBlock {
    pub(super) fn starts_line(&self, cx: &BlockContext<'_>) -> bool {
        cx.line.rest().starts_with(self.marker)
    }

    pub(super) fn parse(&self, cx: &mut BlockContext<'_>) -> BlockResult {
        if !self.starts_line(cx) {
            return BlockResult::Decline;
        }
        let start = cx.line_start() + cx.line.pos;
        let mut marks = vec![Element::leaf(self.mark, start, start + self.marker.len())];
        let close = (self.close)();

        let mut search_from = cx.line.pos + self.marker.len();
        let closed_at = loop {
            let rest = cx.line.text.get(search_from..).unwrap_or("");
            if let Some(found) = close.find(rest) {
                break Some(search_from + found.end());
            }
            if !cx.next_line() {
                break None;
            }
            marks.append(&mut cx.line.markers);
            search_from = 0;
        };

        let end = match closed_at {
            Some(close_end) => {
                let end = cx.line_start() + close_end;
                marks.push(Element::leaf(self.mark, end - self.marker.len(), end));
                if cx.line.text[close_end..].trim().is_empty() {
                    cx.next_line();
                } else {
                    let tail = cx.line.skip_space(close_end);
                    cx.line.move_to(tail);
                }
                end
            }
            None => {
                debug!("Unterminated {:?} starting at {}", self.kind, start);
                cx.line_start() + cx.line.text.len()
            }
        };
        cx.add_element(Element::new(self.kind, start, end, marks));
        BlockResult::Done
    }
}
