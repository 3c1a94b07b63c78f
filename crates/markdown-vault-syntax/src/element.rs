//! Positioned elements produced by block and inline parsers.

use crate::syntax_kind::SyntaxKind;

/// A typed range of the source document with ordered children.
///
/// Offsets are absolute byte positions in the parsed input. Children are
/// sorted, do not overlap, and lie inside `from..to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: SyntaxKind,
    pub from: usize,
    pub to: usize,
    pub children: Vec<Element>,
}

impl Element {
    /// A childless element.
    pub fn leaf(kind: SyntaxKind, from: usize, to: usize) -> Self {
        Self {
            kind,
            from,
            to,
            children: Vec::new(),
        }
    }

    pub fn new(kind: SyntaxKind, from: usize, to: usize, children: Vec<Element>) -> Self {
        Self {
            kind,
            from,
            to,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Source text covered by this element.
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.from..self.to).unwrap_or("")
    }

    /// Depth-first, pre-order walk over this element and its descendants.
    pub fn descendants(&self) -> impl Iterator<Item = &Element> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }

    /// First descendant (or self) of the given kind.
    pub fn find(&self, kind: SyntaxKind) -> Option<&Element> {
        self.descendants().find(|e| e.kind == kind)
    }
}

/// Splice container marks (blockquote `>` markers collected from
/// continuation lines) into a leaf's inline elements, descending into any
/// element that straddles a mark.
pub(crate) fn inject_marks(elements: Vec<Element>, marks: &[Element]) -> Vec<Element> {
    if marks.is_empty() {
        return elements;
    }
    if elements.is_empty() {
        return marks.to_vec();
    }
    let mut elts = elements;
    let mut index = 0;
    for mark in marks {
        while index < elts.len() && elts[index].to < mark.to {
            index += 1;
        }
        if index < elts.len() && elts[index].from < mark.from {
            let children = std::mem::take(&mut elts[index].children);
            elts[index].children = inject_marks(children, std::slice::from_ref(mark));
        } else {
            elts.insert(index, mark.clone());
            index += 1;
        }
    }
    elts
}
