//! Plain text: the model's characters without any style.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::AttributedText;

pub struct TextFormat;

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain text, styles dropped"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<AttributedText, FormatError> {
        Ok(AttributedText::from_text(source))
    }

    fn serialize(&self, doc: &AttributedText) -> Result<String, FormatError> {
        Ok(doc.text())
    }
}
