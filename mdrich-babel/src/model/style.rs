//! Style registry
//!
//!     The closed set of styles the editor understands. Each [`StyleKind`] carries its structural
//!     metadata (line-level or character-level, which auxiliary data it expects) so callers never
//!     look styles up by name on the hot path. Names only exist at the serialization boundary
//!     (json save format, inspect output), see [`StyleKind::name`] and [`StyleKind::from_name`].
//!
//!     Presentation (fonts, colors, margins, theme variants) is deliberately absent: a renderer maps
//!     identifiers to visual attributes on its own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest ATX heading level.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Every style identifier, in registry order.
pub const ALL_STYLES: [StyleKind; 14] = [
    StyleKind::Bold,
    StyleKind::Italic,
    StyleKind::Code,
    StyleKind::Link,
    StyleKind::Image,
    StyleKind::CodeBlock,
    StyleKind::Heading(1),
    StyleKind::Heading(2),
    StyleKind::Heading(3),
    StyleKind::Heading(4),
    StyleKind::Heading(5),
    StyleKind::Heading(6),
    StyleKind::BlockQuote,
    StyleKind::Rule,
];

/// Whether a style shapes whole lines or arbitrary character spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleScope {
    /// Applies to whole lines; at most one line-level style per character.
    Line,
    /// Applies to arbitrary, possibly overlapping spans.
    Inline,
}

/// Which auxiliary payload a style expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuxKind {
    None,
    Link,
    Image,
    CodeInfo,
}

/// A style identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StyleKind {
    Bold,
    Italic,
    Code,
    Link,
    Image,
    CodeBlock,
    /// ATX heading, level 1 through 6. Use [`StyleKind::heading`] to build one.
    Heading(u8),
    BlockQuote,
    /// Horizontal rule (`hr`).
    Rule,
}

impl StyleKind {
    /// Build a heading style, clamping the level into `1..=6`.
    pub fn heading(level: u8) -> Self {
        StyleKind::Heading(level.clamp(1, MAX_HEADING_LEVEL))
    }

    /// Same kind with a heading level clamped into `1..=6`.
    pub fn normalized(self) -> Self {
        match self {
            StyleKind::Heading(level) => StyleKind::heading(level),
            other => other,
        }
    }

    pub fn scope(self) -> StyleScope {
        match self {
            StyleKind::Bold
            | StyleKind::Italic
            | StyleKind::Code
            | StyleKind::Link
            | StyleKind::Image => StyleScope::Inline,
            StyleKind::CodeBlock
            | StyleKind::Heading(_)
            | StyleKind::BlockQuote
            | StyleKind::Rule => StyleScope::Line,
        }
    }

    pub fn is_line_level(self) -> bool {
        self.scope() == StyleScope::Line
    }

    pub fn is_inline(self) -> bool {
        self.scope() == StyleScope::Inline
    }

    pub fn aux_kind(self) -> AuxKind {
        match self {
            StyleKind::Link => AuxKind::Link,
            StyleKind::Image => AuxKind::Image,
            StyleKind::CodeBlock => AuxKind::CodeInfo,
            _ => AuxKind::None,
        }
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            StyleKind::Heading(level) => Some(level),
            _ => None,
        }
    }

    /// Priority among line-level styles when deciding a line's block prefix.
    ///
    /// Lower wins: `codeblock` > `hr` > `heading*` > `blockquote`.
    pub fn line_priority(self) -> Option<u8> {
        match self {
            StyleKind::CodeBlock => Some(0),
            StyleKind::Rule => Some(1),
            StyleKind::Heading(_) => Some(2),
            StyleKind::BlockQuote => Some(3),
            _ => None,
        }
    }

    /// Order in which inline delimiters are opened at the same transition point.
    ///
    /// Links and images nest outermost, code spans innermost.
    pub fn open_rank(self) -> Option<u8> {
        match self {
            StyleKind::Link => Some(0),
            StyleKind::Image => Some(1),
            StyleKind::Bold => Some(2),
            StyleKind::Italic => Some(3),
            StyleKind::Code => Some(4),
            _ => None,
        }
    }

    /// Whether touching ranges of this kind may be merged into one.
    ///
    /// Code blocks and rules delimit blocks, so two adjacent ones stay distinct.
    pub fn coalesces(self) -> bool {
        !matches!(self, StyleKind::CodeBlock | StyleKind::Rule)
    }

    pub fn name(self) -> &'static str {
        match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Code => "code",
            StyleKind::Link => "link",
            StyleKind::Image => "image",
            StyleKind::CodeBlock => "codeblock",
            StyleKind::Heading(0) | StyleKind::Heading(1) => "heading1",
            StyleKind::Heading(2) => "heading2",
            StyleKind::Heading(3) => "heading3",
            StyleKind::Heading(4) => "heading4",
            StyleKind::Heading(5) => "heading5",
            StyleKind::Heading(_) => "heading6",
            StyleKind::BlockQuote => "blockquote",
            StyleKind::Rule => "hr",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ALL_STYLES.iter().copied().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<StyleKind> for String {
    fn from(kind: StyleKind) -> Self {
        kind.name().to_string()
    }
}

impl TryFrom<String> for StyleKind {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        StyleKind::from_name(&name).ok_or_else(|| format!("unknown style '{name}'"))
    }
}

/// Auxiliary data attached to a style range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyleAux {
    Link { url: String, title: String },
    Image { url: String, title: String },
    /// Fence info string of a code block, kept for syntax highlighting collaborators.
    CodeInfo { info: String },
}

impl StyleAux {
    pub fn kind(&self) -> AuxKind {
        match self {
            StyleAux::Link { .. } => AuxKind::Link,
            StyleAux::Image { .. } => AuxKind::Image,
            StyleAux::CodeInfo { .. } => AuxKind::CodeInfo,
        }
    }
}

/// A style instance: an identifier plus its auxiliary data.
///
/// Two spans carry "the same style" when their `Style`s are equal, which is what the exporter
/// compares when deciding whether a delimiter stays open across a transition point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Style {
    pub kind: StyleKind,
    pub aux: Option<StyleAux>,
}

impl Style {
    pub fn plain(kind: StyleKind) -> Self {
        Style { kind, aux: None }
    }

    pub fn with_aux(kind: StyleKind, aux: Option<StyleAux>) -> Self {
        Style { kind, aux }
    }

    pub fn link(url: impl Into<String>, title: impl Into<String>) -> Self {
        Style {
            kind: StyleKind::Link,
            aux: Some(StyleAux::Link {
                url: url.into(),
                title: title.into(),
            }),
        }
    }

    pub fn image(url: impl Into<String>, title: impl Into<String>) -> Self {
        Style {
            kind: StyleKind::Image,
            aux: Some(StyleAux::Image {
                url: url.into(),
                title: title.into(),
            }),
        }
    }

    pub fn code_block(info: &str) -> Self {
        let info = info.trim();
        let aux = (!info.is_empty()).then(|| StyleAux::CodeInfo {
            info: info.to_string(),
        });
        Style {
            kind: StyleKind::CodeBlock,
            aux,
        }
    }
}

impl From<StyleKind> for Style {
    fn from(kind: StyleKind) -> Self {
        Style::plain(kind)
    }
}
