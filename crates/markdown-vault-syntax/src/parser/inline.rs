//! Inline parsing context and delimiter resolution.
//!
//! Inline rules append to an ordered list of parts: finished [`Element`]s,
//! or delimiters that may open and/or close a span. Once the text is
//! scanned, [`InlineContext::resolve_markers`] pairs each closing delimiter
//! with the nearest compatible opener before it, wrapping everything in
//! between. Delimiters left unpaired are dropped and their text stays plain.

use crate::element::Element;
use crate::parser::MarkdownParser;
use crate::parser::line::skip_space;
use crate::syntax_kind::SyntaxKind;

/// Identity of a delimiter family, plus the element it resolves into.
///
/// Two delimiters can only pair when their types are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterType {
    pub name: &'static str,
    /// Kind of the element created when a pair is found. `None` for
    /// delimiters handled by a dedicated rule (link brackets).
    pub resolve: Option<SyntaxKind>,
    /// Kind of the marker elements wrapping the opening and closing text.
    pub mark: Option<SyntaxKind>,
}

impl DelimiterType {
    pub const fn new(name: &'static str, resolve: SyntaxKind, mark: SyntaxKind) -> Self {
        Self {
            name,
            resolve: Some(resolve),
            mark: Some(mark),
        }
    }
}

pub(crate) const EMPHASIS_ASTERISK: DelimiterType =
    DelimiterType::new("EmphasisAsterisk", SyntaxKind::EMPHASIS, SyntaxKind::EMPHASIS_MARK);
pub(crate) const EMPHASIS_UNDERSCORE: DelimiterType =
    DelimiterType::new("EmphasisUnderscore", SyntaxKind::EMPHASIS, SyntaxKind::EMPHASIS_MARK);
pub(crate) const LINK_START: DelimiterType = DelimiterType {
    name: "LinkStart",
    resolve: None,
    mark: None,
};
pub(crate) const IMAGE_START: DelimiterType = DelimiterType {
    name: "ImageStart",
    resolve: None,
    mark: None,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Delimiter {
    pub(crate) kind: DelimiterType,
    pub(crate) from: usize,
    pub(crate) to: usize,
    pub(crate) can_open: bool,
    pub(crate) can_close: bool,
}

impl Delimiter {
    fn len(&self) -> usize {
        self.to - self.from
    }

    pub(crate) fn is_active(&self) -> bool {
        self.can_open || self.can_close
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Part {
    Element(Element),
    Delimiter(Delimiter),
}

pub struct InlineContext<'a> {
    parser: &'a MarkdownParser,
    text: &'a str,
    offset: usize,
    pub(crate) parts: Vec<Option<Part>>,
}

impl<'a> InlineContext<'a> {
    pub(crate) fn new(parser: &'a MarkdownParser, text: &'a str, offset: usize) -> Self {
        Self {
            parser,
            text,
            offset,
            parts: Vec::new(),
        }
    }

    pub fn parser(&self) -> &'a MarkdownParser {
        self.parser
    }

    /// The inline text being parsed.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Document offset of the first byte of [`InlineContext::text`].
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Document offset just past the inline text.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// Character starting at document offset `pos`.
    pub fn char(&self, pos: usize) -> Option<char> {
        let at = pos.checked_sub(self.offset)?;
        self.text.get(at..)?.chars().next()
    }

    /// Character ending at document offset `pos`.
    pub fn char_before(&self, pos: usize) -> Option<char> {
        let at = pos.checked_sub(self.offset)?;
        self.text.get(..at)?.chars().next_back()
    }

    /// Text between two document offsets, clamped to the inline text.
    pub fn slice(&self, from: usize, to: usize) -> &'a str {
        let from = from.max(self.offset) - self.offset;
        let to = to.min(self.end()).saturating_sub(self.offset);
        if from >= to {
            return "";
        }
        self.text.get(from..to).unwrap_or("")
    }

    /// First non-whitespace document offset at or after `pos`.
    pub fn skip_space(&self, pos: usize) -> usize {
        let from = pos.max(self.offset) - self.offset;
        skip_space(self.text, from) + self.offset
    }

    /// Add a finished element, returning the offset to resume at.
    pub fn add_element(&mut self, element: Element) -> usize {
        let to = element.to;
        self.parts.push(Some(Part::Element(element)));
        to
    }

    /// Add a delimiter, returning the offset to resume at.
    pub fn add_delimiter(
        &mut self,
        kind: DelimiterType,
        from: usize,
        to: usize,
        can_open: bool,
        can_close: bool,
    ) -> usize {
        self.parts.push(Some(Part::Delimiter(Delimiter {
            kind,
            from,
            to,
            can_open,
            can_close,
        })));
        to
    }

    /// Pair delimiters from part `from` onwards and return the elements
    /// they and the other parts make up.
    pub(crate) fn resolve_markers(&mut self, from: usize) -> Vec<Element> {
        let mut i = from;
        while i < self.parts.len() {
            let close = match &self.parts[i] {
                Some(Part::Delimiter(d)) if d.can_close && d.kind.resolve.is_some() => *d,
                _ => {
                    i += 1;
                    continue;
                }
            };
            let emphasis = close.kind == EMPHASIS_ASTERISK || close.kind == EMPHASIS_UNDERSCORE;
            let close_size = close.len();

            let opener = (from..i).rev().find_map(|j| match &self.parts[j] {
                Some(Part::Delimiter(open))
                    if open.can_open
                        && open.kind == close.kind
                        && !(emphasis
                            && (close.can_open || open.can_close)
                            && (open.len() + close_size) % 3 == 0
                            && (open.len() % 3 != 0 || close_size % 3 != 0)) =>
                {
                    Some((j, *open))
                }
                _ => None,
            });
            let Some((j, open)) = opener else {
                i += 1;
                continue;
            };

            let mut kind = close.kind.resolve.unwrap_or(SyntaxKind::TEXT);
            let mut start = open.from;
            let mut end = close.to;
            if emphasis {
                let size = open.len().min(close_size).min(2);
                start = open.to - size;
                end = close.from + size;
                kind = if size == 1 {
                    SyntaxKind::EMPHASIS
                } else {
                    SyntaxKind::STRONG_EMPHASIS
                };
            }

            let mut content = Vec::new();
            if let Some(mark) = open.kind.mark {
                content.push(Element::leaf(mark, start, open.to));
            }
            for part in &mut self.parts[j + 1..i] {
                if let Some(Part::Element(element)) = part.take() {
                    content.push(element);
                }
            }
            if let Some(mark) = close.kind.mark {
                content.push(Element::leaf(mark, close.from, end));
            }
            let element = Element::new(kind, start, end, content);

            // Emphasis runs longer than the pair keep their unused characters.
            self.parts[j] = (emphasis && open.from != start)
                .then_some(Part::Delimiter(Delimiter { to: start, ..open }));
            if emphasis && close.to != end {
                self.parts[i] = Some(Part::Delimiter(Delimiter { from: end, ..close }));
                self.parts.insert(i, Some(Part::Element(element)));
            } else {
                self.parts[i] = Some(Part::Element(element));
            }
            i += 1;
        }

        let len = self.parts.len();
        self.parts[from.min(len)..]
            .iter_mut()
            .filter_map(|part| match part.take() {
                Some(Part::Element(element)) => Some(element),
                _ => None,
            })
            .collect()
    }

    /// Resolve everything after part `start` and drop those parts.
    pub(crate) fn take_content(&mut self, start: usize) -> Vec<Element> {
        let content = self.resolve_markers(start);
        self.parts.truncate(start);
        content
    }
}
