//! # markdown-vault-syntax
//!
//! Markdown parsing for personal knowledge vaults: a compact CommonMark host
//! plus the dialect extensions note-taking apps layer on top of it
//! (comments, footnotes, hashtags, wiki links and embeds, highlights, task
//! lists, math and YAML front matter).
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Block parser → Leaf blocks → Inline parser → Element tree → Sink → Rowan Tree
//!               (line cursor)   (paragraphs)   (delimiters)                  (GreenNodeBuilder)
//! ```
//!
//! ### 1. Rules ([`parser`] module)
//!
//! A [`MarkdownParser`] is an ordered list of named block rules and inline
//! rules. Extensions ([`extensions`]) add rules relative to existing ones
//! by name; the order is fixed when the parser is configured.
//!
//! ### 2. Element tree ([`element`] module)
//!
//! Parsing produces [`Element`]s: a kind, an absolute byte range, and
//! ordered children. Only recognised syntax is covered; plain text is the
//! gaps between elements.
//!
//! ### 3. Lossless tree ([`parser::sink`] module)
//!
//! The sink projects the element tree onto the source and fills the gaps
//! with `TEXT` tokens, so the Rowan tree reproduces every input byte.
//!
//! ## Quick Start
//!
//! ```
//! use markdown_vault_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("# Hello #world\n");
//!
//! // The tree preserves all text
//! assert_eq!(tree.text().to_string(), "# Hello #world\n");
//!
//! assert_eq!(tree.kind(), SyntaxKind::DOCUMENT);
//! let heading = tree.children().next().unwrap();
//! assert_eq!(heading.kind(), SyntaxKind::ATX_HEADING1);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! markdown-vault-syntax/
//! ├── lib.rs           # Public API
//! ├── syntax_kind.rs   # SyntaxKind enum and Rowan integration
//! ├── element.rs       # Element tree produced by the parsers
//! ├── extensions/      # Dialect extensions and the extension registry
//! └── parser/
//!     ├── mod.rs       # MarkdownParser, rule specs and configuration
//!     ├── line.rs      # Line cursor
//!     ├── block.rs     # BlockContext: containers, leaf blocks
//!     ├── leaf.rs      # Leaf reclassification (setext, footnotes, tasks)
//!     ├── inline.rs    # InlineContext and delimiter resolution
//!     ├── sink.rs      # Element tree → Rowan GreenNode
//!     └── grammar/     # Host block and inline rules
//! ```

pub mod element;
pub mod extensions;
pub mod parser;
pub mod syntax_kind;

#[cfg(test)]
mod test_support;

pub use element::Element;
pub use parser::sink::build_tree;
pub use parser::{
    BlockParserSpec, ConfigureError, InlineParserSpec, MarkdownConfig, MarkdownParser, Position,
};
pub use syntax_kind::{MarkdownLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Parse `text` with every extension enabled and return the lossless tree.
pub fn parse(text: &str) -> SyntaxNode {
    parse_with(extensions::parser(), text)
}

/// Parse `text` with a configured parser and return the lossless tree.
pub fn parse_with(parser: &MarkdownParser, text: &str) -> SyntaxNode {
    build_tree(text, &parser.parse(text))
}
