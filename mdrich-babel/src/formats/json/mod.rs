//! JSON save format
//!
//! A lossless textual dump of the model, using registry names for style kinds:
//!
//! ```json
//! {
//!   "text": "hello\n",
//!   "styles": [
//!     { "kind": "bold", "start": 0, "end": 5, "aux": null }
//!   ]
//! }
//! ```
//!
//! Parsing validates every range against the text.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::{AttributedText, StyleRange};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct SavedDocument {
    text: String,
    #[serde(default)]
    styles: Vec<StyleRange>,
}

pub fn to_json(doc: &AttributedText) -> Result<String, FormatError> {
    let saved = SavedDocument {
        text: doc.text(),
        styles: doc.styles().to_vec(),
    };
    serde_json::to_string_pretty(&saved)
        .map_err(|e| FormatError::SerializationError(e.to_string()))
}

pub fn from_json(source: &str) -> Result<AttributedText, FormatError> {
    let saved: SavedDocument = serde_json::from_str(source)?;
    AttributedText::from_parts(&saved.text, saved.styles)
}

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Lossless JSON save format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<AttributedText, FormatError> {
        from_json(source)
    }

    fn serialize(&self, doc: &AttributedText) -> Result<String, FormatError> {
        to_json(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Style, StyleKind};

    #[test]
    fn test_saved_shape_uses_registry_names() {
        let mut doc = AttributedText::from_text("hi\n");
        doc.apply_style(StyleKind::heading(2).into(), 0..2);
        doc.apply_style(Style::link("u", ""), 0..2);
        let json: serde_json::Value = serde_json::from_str(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(json["text"], "hi\n");
        assert_eq!(json["styles"][0]["kind"], "heading2");
        assert_eq!(json["styles"][0]["aux"], serde_json::Value::Null);
        assert_eq!(json["styles"][1]["aux"]["type"], "link");
        assert_eq!(json["styles"][1]["aux"]["url"], "u");
    }

    #[test]
    fn test_load_restores_the_model() {
        let mut doc = AttributedText::from_text("code\n");
        doc.apply_style(Style::code_block("rust"), 0..5);
        let loaded = from_json(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_invalid_documents_are_parse_errors() {
        assert!(matches!(
            from_json("{\"text\": 1}"),
            Err(FormatError::ParseError(_))
        ));
        let out_of_bounds = r#"{"text": "ab", "styles": [{"kind": "bold", "start": 0, "end": 5}]}"#;
        assert!(matches!(
            from_json(out_of_bounds),
            Err(FormatError::ParseError(_))
        ));
        let unknown = r#"{"text": "ab", "styles": [{"kind": "strike", "start": 0, "end": 1}]}"#;
        assert!(from_json(unknown).is_err());
    }
}
