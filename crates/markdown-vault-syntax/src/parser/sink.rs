//! Sink for converting an element tree into a Rowan green tree.
//!
//! Elements only describe the ranges the parsers recognised. The sink fills
//! every uncovered byte range with a `TEXT` token, so the resulting tree's
//! text is always the full input.

use rowan::GreenNodeBuilder;

use crate::element::Element;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

/// Converts a parsed element tree and its source into a Rowan syntax tree.
pub struct Sink<'input> {
    builder: GreenNodeBuilder<'static>,
    input: &'input str,
    cursor: usize,
}

impl<'input> Sink<'input> {
    /// Create a new sink over the source text the elements were parsed from.
    pub fn new(input: &'input str) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            input,
            cursor: 0,
        }
    }

    /// Consume the sink and build the syntax tree rooted at `root`.
    pub fn finish(mut self, root: &Element) -> SyntaxNode {
        self.builder.start_node(root.kind.into());
        self.text_until(root.from);
        self.children(&root.children, root.to);
        // Bytes past the root still belong to the tree.
        self.text_until(self.input.len());
        self.builder.finish_node();
        SyntaxNode::new_root(self.builder.finish())
    }

    fn element(&mut self, element: &Element) {
        let from = element.from.max(self.cursor);
        let to = element.to.max(from);
        if element.children.is_empty() && element.kind.is_token() {
            if to > from {
                self.token(element.kind, from, to);
            }
            return;
        }
        self.builder.start_node(element.kind.into());
        self.children(&element.children, to);
        self.builder.finish_node();
    }

    fn children(&mut self, children: &[Element], to: usize) {
        for child in children {
            if child.from >= to && child.to > to {
                break;
            }
            self.text_until(child.from);
            self.element(child);
        }
        self.text_until(to);
    }

    fn text_until(&mut self, to: usize) {
        if to > self.cursor {
            self.token(SyntaxKind::TEXT, self.cursor, to);
        }
    }

    fn token(&mut self, kind: SyntaxKind, from: usize, to: usize) {
        let to = to.min(self.input.len());
        if let Some(text) = self.input.get(from..to) {
            self.builder.token(kind.into(), text);
            self.cursor = to;
        }
    }
}

/// Project a parsed element tree onto its source, producing a lossless tree.
pub fn build_tree(input: &str, root: &Element) -> SyntaxNode {
    Sink::new(input).finish(root)
}
