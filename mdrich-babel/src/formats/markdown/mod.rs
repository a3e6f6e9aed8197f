//! Markdown format implementation
//!
//! This module implements conversion between CommonMark Markdown and the attributed text model.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing. Export is hand written on purpose: the model
//! is flat (text plus styled ranges) and the writer has to reconcile overlapping ranges into
//! properly nested delimiters, which no AST formatter can do for us.
//!
//! # Element Mapping Table
//!
//! | Markdown            | Model                                   | Export                        |
//! |---------------------|-----------------------------------------|-------------------------------|
//! | Paragraph           | text + `\n`                             | blank-line separated line     |
//! | Heading (# .. ######) | `heading1`..`heading6` over the text  | `#`×n + space                 |
//! | Emphasis / Strong   | `italic` / `bold`                       | `*` / `**`, `***` when paired |
//! | Code span           | `code`                                  | backtick run sized to content |
//! | Code block          | `codeblock` (+ info)                    | fence sized to content        |
//! | Link / Image        | `link` / `image` (+ url, title)         | `[..](..)` / `![..](..)`      |
//! | Block quote         | `blockquote` over each line's text      | `> `                          |
//! | Thematic break      | rule glyph tagged `hr`                  | `---`                         |
//! | List item           | literal `* ` / `1. ` marker text        | marker copied raw             |
//!
//! Only the configured bullet or `1.`, followed by a space, is copied raw at a line start. Every
//! other marker-like prefix (`- `, `+ `, `2024. `, `10) `) is escaped so it stays paragraph text.
//!
//! # Lossy Conversions
//!
//! - Soft breaks become spaces
//! - Hard breaks become paragraph breaks on export
//! - Ordered lists restart at `1.` for every item
//! - Raw HTML blocks become plain text
//! - Adjacent closing and opening delimiters (`****`) may re-parse differently
//! - A heading inside a block quote keeps its heading and loses the quote
//! - A paragraph that literally starts with the bullet marker or `1. ` re-imports as a list item
//!
//! # Options
//!
//! [`MarkdownFormat::serialize_with_options`] accepts `range` (`start..end`, exports only that
//! selection), `fence` (`` ` `` or `~`) and `rule`.

pub mod escape;
pub mod options;
pub mod parser;
pub mod selection;
pub mod serializer;

pub use options::{ExportOptions, ImportOptions};
pub use parser::{
    import_document, parse_from_markdown, parse_with_options, Degradation, ImportReport, Imported,
};
pub use selection::serialize_range;
pub use serializer::{serialize_to_markdown, serialize_with_options, MarkdownWriter};

use crate::error::FormatError;
use crate::format::Format;
use crate::model::AttributedText;
use std::collections::HashMap;

/// Markdown, read with comrak and written by [`MarkdownWriter`].
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    pub import: ImportOptions,
    pub export: ExportOptions,
}

impl MarkdownFormat {
    /// The exporter recognises list lines by the bullet the importer writes, so `export.bullet`
    /// follows `import.bullet`.
    pub fn new(import: ImportOptions, mut export: ExportOptions) -> Self {
        export.bullet = import.bullet;
        MarkdownFormat { import, export }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<AttributedText, FormatError> {
        parse_with_options(source, &self.import).map(|imported| imported.text)
    }

    fn serialize(&self, doc: &AttributedText) -> Result<String, FormatError> {
        Ok(serialize_with_options(doc, &self.export))
    }

    fn serialize_with_options(
        &self,
        doc: &AttributedText,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut export = self.export.clone();
        let mut range = None;
        for (key, value) in options {
            match key.as_str() {
                "range" => {
                    range = Some(selection::parse_range(value).ok_or_else(|| {
                        FormatError::SerializationError(format!(
                            "invalid range '{value}', expected start..end"
                        ))
                    })?);
                }
                "fence" => {
                    export.fence = match value.as_str() {
                        "`" | "backtick" => '`',
                        "~" | "tilde" => '~',
                        other => {
                            return Err(FormatError::SerializationError(format!(
                                "invalid fence '{other}', expected ` or ~"
                            )))
                        }
                    };
                }
                "rule" => export.rule = value.clone(),
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "markdown does not accept the parameter '{other}'"
                    )))
                }
            }
        }
        export.validate()?;
        Ok(match range {
            Some(range) => serialize_range(doc, range, &export),
            None => serialize_with_options(doc, &export),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trip() {
        let format = MarkdownFormat::default();
        let doc = format.parse("# Title\n\nSome *text*.\n").unwrap();
        assert_eq!(
            format.serialize(&doc).unwrap(),
            "# Title\n\nSome *text*.\n"
        );
    }

    #[test]
    fn test_range_option() {
        let format = MarkdownFormat::default();
        let doc = format.parse("**hello bold world**\n").unwrap();
        let mut options = HashMap::new();
        options.insert("range".to_string(), "6..10".to_string());
        assert_eq!(
            format.serialize_with_options(&doc, &options).unwrap(),
            "**bold**\n"
        );
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let format = MarkdownFormat::default();
        let mut options = HashMap::new();
        options.insert("theme".to_string(), "dark".to_string());
        let err = format
            .serialize_with_options(&AttributedText::new(), &options)
            .unwrap_err();
        assert!(matches!(err, FormatError::NotSupported(_)));
    }

    #[test]
    fn test_rule_option_must_be_a_thematic_break() {
        let format = MarkdownFormat::default();
        let doc = format.parse("a\n\n---\n\nb\n").unwrap();
        let mut options = HashMap::new();
        options.insert("rule".to_string(), "***".to_string());
        assert_eq!(
            format.serialize_with_options(&doc, &options).unwrap(),
            "a\n\n***\n\nb\n"
        );
        options.insert("rule".to_string(), "hr".to_string());
        let err = format.serialize_with_options(&doc, &options).unwrap_err();
        assert!(matches!(err, FormatError::InvalidInput(_)));
    }

    #[test]
    fn test_custom_bullet_follows_into_export() {
        let import = ImportOptions {
            bullet: '-',
            ..ImportOptions::default()
        };
        let format = MarkdownFormat::new(import, ExportOptions::default());
        assert_eq!(format.export.bullet, '-');
        let doc = format.parse("* one\n* two\n").unwrap();
        assert_eq!(doc.text(), "- one\n- two\n");
        assert_eq!(format.serialize(&doc).unwrap(), "- one\n- two\n");
    }
}
