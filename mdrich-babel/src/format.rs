//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing text into an [`AttributedText`] and for
//! serializing one back out.

use crate::error::FormatError;
use crate::model::AttributedText;
use std::collections::HashMap;

/// Trait for document formats
///
/// Implementors provide conversion between a string representation and the attributed text
/// model. Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &AttributedText) -> Result<String, FormatError> {
///         Ok(doc.text().to_uppercase())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → AttributedText)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (AttributedText → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into an attributed text
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<AttributedText, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize an attributed text into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &AttributedText) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize, optionally using extra parameters.
    ///
    /// Formats without parameters can rely on the default implementation, which delegates to
    /// [`Format::serialize`] and rejects any non-empty option map.
    fn serialize_with_options(
        &self,
        doc: &AttributedText,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(doc)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
