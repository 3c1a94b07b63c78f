//! # Parser - Configurable Block and Inline Rules
//!
//! Parsing runs in two layers:
//!
//! 1. **Block parsing** walks the input line by line ([`BlockContext`]).
//!    Container markup (blockquote `>`, list indentation) is consumed first,
//!    then each block rule is offered the rest of the line. When no rule
//!    claims it, the line opens a **leaf block** (a paragraph candidate) that
//!    grows line by line until an end-leaf predicate fires or a blank line
//!    is seen. Leaf parsers attached to the leaf may reclassify it (setext
//!    heading, footnote definition, task).
//! 2. **Inline parsing** runs over each leaf's text ([`InlineContext`]).
//!    Rules either add finished elements or push delimiters; delimiters are
//!    paired in a single sweep at the end.
//!
//! ## Rule Ordering
//!
//! Rules are named. A [`MarkdownConfig`] can add rules relative to existing
//! ones with [`Position::Before`] or [`Position::After`]; a rule without a
//! position lands just ahead of the last rule of its list. Reusing an
//! existing name replaces that rule in place. Names are resolved once in
//! [`MarkdownParser::configure`] and never consulted while parsing.
//!
//! ```
//! use markdown_vault_syntax::{MarkdownParser, extensions};
//!
//! let parser = MarkdownParser::default()
//!     .configure(&[extensions::MARK])
//!     .expect("built-in positions resolve");
//! let doc = parser.parse("==hi==\n");
//! assert_eq!(doc.children.len(), 1);
//! ```

pub mod block;
pub mod inline;
pub mod leaf;
pub mod line;
pub mod sink;

pub(crate) mod grammar;

use log::trace;
use thiserror::Error;

use crate::element::Element;
use crate::syntax_kind::SyntaxKind;
pub use block::{BlockContext, BlockResult, LeafBlock};
pub use inline::{DelimiterType, InlineContext};
pub use leaf::LeafParser;
pub use line::Line;

/// Block rule: inspects `cx.line` and either declines, consumes lines, or
/// opens a container.
pub type BlockParseFn = fn(&mut BlockContext<'_>) -> BlockResult;
/// Leaf rule: offered every new leaf block, may attach a [`LeafParser`].
pub type LeafStartFn = fn(&BlockContext<'_>, &LeafBlock) -> Option<LeafParser>;
/// Returns true when the current line must end the open leaf block.
pub type EndLeafFn = fn(&BlockContext<'_>, &LeafBlock) -> bool;
/// Inline rule: called with the character at `pos`; returns the position to
/// resume at when it consumed something.
pub type InlineParseFn = fn(&mut InlineContext<'_>, char, usize) -> Option<usize>;

/// Where to insert a rule relative to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Before(&'static str),
    After(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct BlockParserSpec {
    pub name: &'static str,
    pub parse: Option<BlockParseFn>,
    pub leaf: Option<LeafStartFn>,
    pub end_leaf: Option<EndLeafFn>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Copy)]
pub struct InlineParserSpec {
    pub name: &'static str,
    pub parse: InlineParseFn,
    pub position: Option<Position>,
}

/// A bundle of node kinds and rules added to a parser together.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownConfig {
    pub name: &'static str,
    pub define_nodes: &'static [SyntaxKind],
    pub parse_block: &'static [BlockParserSpec],
    pub parse_inline: &'static [InlineParserSpec],
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigureError {
    #[error("Rule {rule} is positioned relative to unknown rule {anchor}")]
    UnknownPosition {
        rule: &'static str,
        anchor: &'static str,
    },
}

/// A configured Markdown parser. Immutable once built; each call to
/// [`MarkdownParser::parse`] uses its own block context.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    node_kinds: Vec<SyntaxKind>,
    block_names: Vec<&'static str>,
    block_parsers: Vec<Option<BlockParseFn>>,
    leaf_parsers: Vec<Option<LeafStartFn>>,
    end_leaf: Vec<EndLeafFn>,
    inline_names: Vec<&'static str>,
    inline_parsers: Vec<InlineParseFn>,
}

impl Default for MarkdownParser {
    /// The CommonMark subset with no dialect extensions.
    fn default() -> Self {
        grammar::commonmark()
    }
}

impl MarkdownParser {
    /// Returns a new parser with the given extensions applied in order.
    pub fn configure(&self, extensions: &[MarkdownConfig]) -> Result<Self, ConfigureError> {
        let mut parser = self.clone();
        for extension in extensions {
            trace!("Configuring extension {}", extension.name);
            for kind in extension.define_nodes {
                if !parser.node_kinds.contains(kind) {
                    parser.node_kinds.push(*kind);
                }
            }
            for spec in extension.parse_block {
                parser.add_block_rule(spec)?;
            }
            for spec in extension.parse_inline {
                parser.add_inline_rule(spec)?;
            }
        }
        Ok(parser)
    }

    fn add_block_rule(&mut self, spec: &BlockParserSpec) -> Result<(), ConfigureError> {
        if let Some(found) = self.block_names.iter().position(|n| *n == spec.name) {
            self.block_parsers[found] = spec.parse;
            self.leaf_parsers[found] = spec.leaf;
        } else {
            let at = insert_position(&self.block_names, spec.name, spec.position)?;
            trace!("Block rule {} at {}", spec.name, at);
            self.block_names.insert(at, spec.name);
            self.block_parsers.insert(at, spec.parse);
            self.leaf_parsers.insert(at, spec.leaf);
        }
        if let Some(end_leaf) = spec.end_leaf {
            self.end_leaf.push(end_leaf);
        }
        Ok(())
    }

    fn add_inline_rule(&mut self, spec: &InlineParserSpec) -> Result<(), ConfigureError> {
        if let Some(found) = self.inline_names.iter().position(|n| *n == spec.name) {
            self.inline_parsers[found] = spec.parse;
        } else {
            let at = insert_position(&self.inline_names, spec.name, spec.position)?;
            trace!("Inline rule {} at {}", spec.name, at);
            self.inline_names.insert(at, spec.name);
            self.inline_parsers.insert(at, spec.parse);
        }
        Ok(())
    }

    /// Parse a whole document into its element tree. Never fails.
    pub fn parse(&self, input: &str) -> Element {
        BlockContext::new(self, input).run()
    }

    /// Parse `text` as inline content whose first byte sits at `offset` in
    /// the document.
    pub fn parse_inline(&self, text: &str, offset: usize) -> Vec<Element> {
        let mut cx = InlineContext::new(self, text, offset);
        let end = cx.end();
        let mut pos = offset;
        'outer: while pos < end {
            let Some(next) = cx.char(pos) else {
                break;
            };
            for parse in &self.inline_parsers {
                if let Some(to) = parse(&mut cx, next, pos) {
                    pos = to;
                    continue 'outer;
                }
            }
            pos += next.len_utf8();
        }
        cx.resolve_markers(0)
    }

    /// Block rule names in the order they are tried.
    pub fn block_names(&self) -> &[&'static str] {
        &self.block_names
    }

    /// Inline rule names in the order they are tried.
    pub fn inline_names(&self) -> &[&'static str] {
        &self.inline_names
    }

    /// Whether an extension applied to this parser declared `kind`.
    pub fn defines(&self, kind: SyntaxKind) -> bool {
        self.node_kinds.contains(&kind)
    }

    pub(crate) fn has_leaf_parser(&self, name: &str) -> bool {
        self.block_names
            .iter()
            .position(|n| *n == name)
            .is_some_and(|i| self.leaf_parsers[i].is_some())
    }
}

fn insert_position(
    names: &[&'static str],
    rule: &'static str,
    position: Option<Position>,
) -> Result<usize, ConfigureError> {
    let find = |anchor: &'static str| {
        names
            .iter()
            .position(|n| *n == anchor)
            .ok_or(ConfigureError::UnknownPosition { rule, anchor })
    };
    match position {
        Some(Position::Before(anchor)) => find(anchor),
        Some(Position::After(anchor)) => find(anchor).map(|i| i + 1),
        None => Ok(names.len().saturating_sub(1)),
    }
}
