//! Markdown import (Markdown → attributed text)
//!
//! Pipeline: Markdown string → Comrak AST → depth-first walk → AttributedText
//!
//! The walk carries a [`Scope`] by value: the inline styles opened by enclosing nodes, the single
//! line-level style in force (an inner block style replaces an outer one, which keeps line-level
//! styles exclusive) and the list context. Every node appends its text to the buffer and tags
//! exactly the appended span, so no range is ever patched after the fact.
//!
//! Structure the model cannot hold is degraded rather than rejected. Each loss is recorded as a
//! [`Degradation`] in the [`ImportReport`].

use super::options::ImportOptions;
use crate::error::FormatError;
use crate::model::{AttributedText, Style, StyleKind};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use std::fmt;

/// Stand-in text for a link or image without text, so its range is not empty.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Result of an import: the model plus what could not be represented faithfully.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Imported {
    pub text: AttributedText,
    pub report: ImportReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub degradations: Vec<Degradation>,
}

impl ImportReport {
    pub fn is_lossless(&self) -> bool {
        self.degradations.is_empty()
    }
}

/// A construct that was imported best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// Code block without content; no text was produced.
    EmptyCodeBlock,
    /// Heading without content; its style has no span to cover.
    EmptyHeading { level: u8 },
    /// Link or image without text; a placeholder character carries the style.
    Placeholder { kind: StyleKind },
    /// Raw HTML block kept as plain text.
    RawHtmlBlock,
    /// A node kind the editor cannot represent; its children were imported unstyled.
    Unsupported(String),
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::EmptyCodeBlock => write!(f, "empty code block dropped"),
            Degradation::EmptyHeading { level } => write!(f, "empty heading{level} dropped"),
            Degradation::Placeholder { kind } => write!(f, "{kind} without text, placeholder used"),
            Degradation::RawHtmlBlock => write!(f, "raw html block kept as plain text"),
            Degradation::Unsupported(kind) => write!(f, "unsupported {kind}, children kept unstyled"),
        }
    }
}

/// Parse Markdown to an attributed text with default options.
pub fn parse_from_markdown(source: &str) -> Result<AttributedText, FormatError> {
    parse_with_options(source, &ImportOptions::default()).map(|imported| imported.text)
}

/// Parse Markdown and import it, keeping the degradation report.
pub fn parse_with_options(source: &str, options: &ImportOptions) -> Result<Imported, FormatError> {
    let arena = Arena::new();
    let comrak_options = comrak_options(options);
    let root = parse_document(&arena, source, &comrak_options);
    import_document(Some(root), options)
}

/// Comrak parse options. Extensions stay off: the editor has no table or strikethrough style.
pub fn comrak_options(options: &ImportOptions) -> ComrakOptions<'static> {
    let mut comrak = ComrakOptions::default();
    comrak.parse.smart = options.smart_punctuation;
    comrak
}

/// Import an already parsed Comrak tree.
///
/// Fails only when there is no root; an empty document gives an empty model.
pub fn import_document<'a>(
    root: Option<&'a AstNode<'a>>,
    options: &ImportOptions,
) -> Result<Imported, FormatError> {
    let root = root.ok_or_else(|| FormatError::InvalidInput("missing document root".into()))?;
    let mut importer = Importer {
        doc: AttributedText::new(),
        report: ImportReport::default(),
        options,
    };
    importer.walk(root, &Scope::default());
    log::debug!(
        "imported {} chars, {} style ranges, {} degradations",
        importer.doc.len(),
        importer.doc.styles().len(),
        importer.report.degradations.len()
    );
    Ok(Imported {
        text: importer.doc,
        report: importer.report,
    })
}

/// Styles and list context inherited from enclosing nodes.
#[derive(Debug, Clone, Default)]
struct Scope {
    inline: Vec<Style>,
    line: Option<Style>,
    ordered: bool,
    indent: usize,
}

impl Scope {
    fn with_inline(&self, style: Style) -> Self {
        let mut scope = self.clone();
        if !scope.inline.contains(&style) {
            scope.inline.push(style);
        }
        scope
    }

    fn with_line(&self, style: Style) -> Self {
        Scope {
            line: Some(style),
            ..self.clone()
        }
    }

    fn styles(&self) -> Vec<Style> {
        self.line.iter().chain(&self.inline).cloned().collect()
    }
}

struct Importer<'o> {
    doc: AttributedText,
    report: ImportReport,
    options: &'o ImportOptions,
}

impl Importer<'_> {
    fn walk<'a>(&mut self, node: &'a AstNode<'a>, scope: &Scope) {
        let node_data = node.data.borrow();
        match &node_data.value {
            NodeValue::Document => self.walk_children(node, scope),
            NodeValue::Text(text) => {
                self.doc.append(text, &scope.styles());
            }
            NodeValue::Strong => {
                self.walk_children(node, &scope.with_inline(StyleKind::Bold.into()));
            }
            NodeValue::Emph => {
                self.walk_children(node, &scope.with_inline(StyleKind::Italic.into()));
            }
            NodeValue::Code(code) => {
                let inner = scope.with_inline(StyleKind::Code.into());
                self.doc.append(&code.literal, &inner.styles());
            }
            NodeValue::Heading(heading) => {
                let start = self.doc.len();
                let style = Style::plain(StyleKind::heading(heading.level));
                self.walk_children(node, &scope.with_line(style));
                if self.doc.len() == start {
                    self.degrade(Degradation::EmptyHeading {
                        level: heading.level,
                    });
                }
                if !parent_is_item(node) {
                    self.doc.append("\n\n", &[]);
                }
            }
            NodeValue::CodeBlock(block) => {
                if block.literal.is_empty() {
                    self.degrade(Degradation::EmptyCodeBlock);
                    return;
                }
                self.ensure_line_start();
                let mut literal = block.literal.clone();
                if !literal.ends_with('\n') {
                    literal.push('\n');
                }
                self.doc.append(&literal, &[Style::code_block(&block.info)]);
            }
            NodeValue::ThematicBreak => {
                self.ensure_line_start();
                let rule = format!("{}\n", self.options.rule_glyph);
                self.doc.append(&rule, &[Style::plain(StyleKind::Rule)]);
            }
            NodeValue::Paragraph => {
                self.walk_children(node, scope);
                if !parent_is_item(node) {
                    self.doc.append("\n", &[]);
                }
            }
            NodeValue::List(list) => {
                let inner = Scope {
                    ordered: list.list_type == ListType::Ordered,
                    ..scope.clone()
                };
                self.walk_children(node, &inner);
            }
            NodeValue::Item(_) => self.walk_item(node, scope),
            NodeValue::BlockQuote => {
                self.walk_children(node, &scope.with_line(StyleKind::BlockQuote.into()));
            }
            NodeValue::Link(link) => {
                let style = Style::link(link.url.clone(), link.title.clone());
                self.walk_linked(node, scope, style);
            }
            NodeValue::Image(link) => {
                let style = Style::image(link.url.clone(), link.title.clone());
                self.walk_linked(node, scope, style);
            }
            NodeValue::LineBreak => {
                self.doc.append("\n", &[]);
            }
            NodeValue::SoftBreak => {
                self.doc.append(" ", &scope.styles());
            }
            NodeValue::HtmlInline(html) => {
                self.doc.append(html, &scope.styles());
            }
            NodeValue::HtmlBlock(html) => {
                self.degrade(Degradation::RawHtmlBlock);
                self.ensure_line_start();
                self.doc.append(&html.literal, &[]);
                self.ensure_line_start();
            }
            other => {
                let name = format!("{other:?}");
                let name = name.split(['(', ' ', '{']).next().unwrap_or_default();
                self.degrade(Degradation::Unsupported(name.to_string()));
                self.walk_children(node, scope);
            }
        }
    }

    fn walk_children<'a>(&mut self, node: &'a AstNode<'a>, scope: &Scope) {
        for child in node.children() {
            self.walk(child, scope);
        }
    }

    fn walk_item<'a>(&mut self, node: &'a AstNode<'a>, scope: &Scope) {
        self.ensure_line_start();
        let marker = if scope.ordered {
            "1. ".to_string()
        } else {
            format!("{} ", self.options.bullet)
        };
        let prefix = format!("{}{}", " ".repeat(scope.indent), marker);
        self.doc.append(&prefix, &scope.line.iter().cloned().collect::<Vec<_>>());

        let inner = Scope {
            indent: scope.indent + marker.chars().count(),
            ..scope.clone()
        };
        for (i, child) in node.children().enumerate() {
            if i > 0 {
                self.ensure_line_start();
            }
            self.walk(child, &inner);
        }
        self.ensure_line_start();
    }

    fn walk_linked<'a>(&mut self, node: &'a AstNode<'a>, scope: &Scope, style: Style) {
        let kind = style.kind;
        let inner = scope.with_inline(style);
        let start = self.doc.len();
        self.walk_children(node, &inner);
        if self.doc.len() == start {
            self.degrade(Degradation::Placeholder { kind });
            self.doc
                .append(&OBJECT_REPLACEMENT.to_string(), &inner.styles());
        }
    }

    fn ensure_line_start(&mut self) {
        if !self.doc.is_empty() && !self.doc.ends_with_newline() {
            self.doc.append("\n", &[]);
        }
    }

    fn degrade(&mut self, degradation: Degradation) {
        log::debug!("markdown import degraded: {degradation:?}");
        self.report.degradations.push(degradation);
    }
}

fn parent_is_item<'a>(node: &'a AstNode<'a>) -> bool {
    node.parent()
        .is_some_and(|parent| matches!(parent.data.borrow().value, NodeValue::Item(_)))
}
