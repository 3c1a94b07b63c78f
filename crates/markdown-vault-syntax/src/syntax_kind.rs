//! SyntaxKind enum for every element the block and inline parsers produce.
//!
//! Host and dialect kinds share one enum so that a configured parser can
//! project its element tree straight into a rowan tree.

/// All syntax kinds for the Markdown tree.
///
/// Kinds up to [`SyntaxKind::YAML_CONTENT`] are leaf kinds (delimiters,
/// labels, raw content); the rest are composite kinds. The `repr(u16)`
/// ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Leaf kinds ===
    /// Source text not claimed by any element
    TEXT,
    /// `#` run of an ATX heading, or the underline of a setext heading
    HEADER_MARK,
    /// `>` of a blockquote line
    QUOTE_MARK,
    /// `-`, `*`, `+`, `1.` or `1)` starting a list item
    LIST_MARK,
    /// Fence or backtick run around code
    CODE_MARK,
    /// Info string after an opening fence
    CODE_INFO,
    /// Body of a fenced code block
    CODE_TEXT,
    /// `*`/`_` run closing or opening emphasis
    EMPHASIS_MARK,
    /// `[`, `]`, `(`, `)` or `:` in links and link references
    LINK_MARK,
    /// `[label]` of a reference
    LINK_LABEL,
    /// Link destination
    URL,
    /// Backslash escape
    ESCAPE,
    /// `%%` around a comment
    COMMENT_MARKER,
    /// `[^`, `]` or `]:` of a footnote
    FOOTNOTE_MARK,
    /// Footnote identifier
    FOOTNOTE_LABEL,
    /// `#` of a hashtag
    HASHTAG_MARK,
    /// Tag name after `#`
    HASHTAG_LABEL,
    /// `!` before an embedded internal link
    EMBED_MARK,
    /// `[[`, `|` or `]]` of an internal link
    INTERNAL_MARK,
    /// Target note of an internal link
    INTERNAL_PATH,
    /// `#heading` or `#^block` part of an internal link
    INTERNAL_SUBPATH,
    /// Display text after `|`
    INTERNAL_DISPLAY,
    /// `==` around highlighted text
    MARK_MARKER,
    /// `~~` around struck-through text
    STRIKETHROUGH_MARK,
    /// Cell-separating `|`, or a whole `| --- | :-: |` alignment row
    TABLE_DELIMITER,
    /// `[ ]`, `[x]` prefix of a task
    TASK_MARKER,
    /// `$` or `$$` around TeX
    TEX_MARKER,
    /// `---` fence of a front matter block
    YAML_MARKER,
    /// Raw YAML between the fences
    YAML_CONTENT,

    // === Composite kinds ===
    /// Root of every parse
    DOCUMENT,
    PARAGRAPH,
    BLOCKQUOTE,
    BULLET_LIST,
    ORDERED_LIST,
    LIST_ITEM,
    ATX_HEADING1,
    ATX_HEADING2,
    ATX_HEADING3,
    ATX_HEADING4,
    ATX_HEADING5,
    ATX_HEADING6,
    SETEXT_HEADING1,
    SETEXT_HEADING2,
    HORIZONTAL_RULE,
    FENCED_CODE,
    LINK_REFERENCE,
    EMPHASIS,
    STRONG_EMPHASIS,
    INLINE_CODE,
    LINK,
    IMAGE,
    /// `%%comment%%`, inline or spanning lines
    COMMENT,
    /// `[^label]` inside text
    FOOTNOTE,
    /// `[^label]: body` definition block
    FOOTNOTE_REFERENCE,
    HASHTAG,
    /// `[[path#subpath|display]]`
    INTERNAL_LINK,
    /// `![[...]]`
    EMBED,
    /// `==highlight==`
    MARK,
    STRIKETHROUGH,
    /// Pipe table: header row, alignment row, body rows
    TABLE,
    TABLE_HEADER,
    TABLE_ROW,
    TABLE_CELL,
    /// List item paragraph starting with a `[.]` checkbox
    TASK,
    /// `$$ ... $$` display math
    TEX_BLOCK,
    /// `$...$` inline math
    TEX_INLINE,
    /// `---` delimited YAML block at the top of a document
    YAML_FRONT_MATTER,
}

impl SyntaxKind {
    /// Returns true if this kind never has children of its own.
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::YAML_CONTENT as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// ATX heading kind for a level between 1 and 6.
    pub fn atx_heading(level: usize) -> Option<Self> {
        match level {
            1 => Some(Self::ATX_HEADING1),
            2 => Some(Self::ATX_HEADING2),
            3 => Some(Self::ATX_HEADING3),
            4 => Some(Self::ATX_HEADING4),
            5 => Some(Self::ATX_HEADING5),
            6 => Some(Self::ATX_HEADING6),
            _ => None,
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkdownLang {}

impl rowan::Language for MarkdownLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::YAML_FRONT_MATTER as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<MarkdownLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<MarkdownLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<MarkdownLang>;
