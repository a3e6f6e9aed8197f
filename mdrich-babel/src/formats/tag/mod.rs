//! XML-like run dump
//!
//! Serializes the attributed text line by line, wrapping every run of constant style in the
//! tags of its styles (line-level styles outermost). Meant for inspection and snapshot tests,
//! so it is serialization only.
//!
//! ## Example
//!
//! ```text
//! <document>
//!   <line><heading1>Title</heading1></line>
//!   <line/>
//!   <line>Some <bold>loud</bold><bold><link url="http://x.com">text</link></bold></line>
//! </document>
//! ```

use crate::common::segments::{segments, Segment};
use crate::error::FormatError;
use crate::format::Format;
use crate::model::{AttributedText, StyleAux, StyleRange};
use std::collections::HashMap;
use std::ops::Range;

/// Serialize a document to the tag format
pub fn serialize_document(doc: &AttributedText) -> String {
    serialize_document_with_params(doc, &HashMap::new())
}

/// Serialize a document to the tag format with optional parameters
///
/// # Parameters
///
/// - `"show-offsets"`: when set to anything but `"false"`, every line and run carries an
///   `at="start..end"` attribute with its char offsets.
pub fn serialize_document_with_params(
    doc: &AttributedText,
    params: &HashMap<String, String>,
) -> String {
    let show_offsets = params
        .get("show-offsets")
        .map(|v| v != "false")
        .unwrap_or(false);

    let mut result = String::from("<document>\n");
    let mut line = String::new();
    let mut line_start = 0;
    for segment in segments(doc, 0..doc.len()) {
        let tags = run_tags(doc, &segment);
        let mut start = segment.start;
        for offset in segment.range() {
            if doc.chars()[offset] == '\n' {
                push_run(&mut line, doc, &tags, start..offset, show_offsets);
                push_line(&mut result, &line, line_start..offset, show_offsets);
                line.clear();
                line_start = offset + 1;
                start = offset + 1;
            }
        }
        push_run(&mut line, doc, &tags, start..segment.end, show_offsets);
    }
    if !line.is_empty() {
        push_line(&mut result, &line, line_start..doc.len(), show_offsets);
    }
    result.push_str("</document>");
    result
}

/// Opening tags of a run, line-level styles first.
fn run_tags(doc: &AttributedText, segment: &Segment) -> Vec<(String, String)> {
    let mut styles: Vec<&StyleRange> = segment.styles(doc).collect();
    styles.sort_by_key(|r| {
        (
            r.kind.is_inline(),
            r.kind.line_priority().or(r.kind.open_rank()),
        )
    });
    styles
        .into_iter()
        .map(|r| (r.kind.name().to_string(), aux_attributes(r.aux.as_ref())))
        .collect()
}

fn aux_attributes(aux: Option<&StyleAux>) -> String {
    match aux {
        Some(StyleAux::Link { url, title }) | Some(StyleAux::Image { url, title }) => {
            let mut attrs = format!(" url=\"{}\"", escape_xml(url));
            if !title.is_empty() {
                attrs.push_str(&format!(" title=\"{}\"", escape_xml(title)));
            }
            attrs
        }
        Some(StyleAux::CodeInfo { info }) => format!(" info=\"{}\"", escape_xml(info)),
        None => String::new(),
    }
}

fn push_run(
    line: &mut String,
    doc: &AttributedText,
    tags: &[(String, String)],
    range: Range<usize>,
    show_offsets: bool,
) {
    if range.is_empty() {
        return;
    }
    for (name, attrs) in tags {
        line.push_str(&format!("<{name}{attrs}>"));
    }
    if show_offsets && tags.is_empty() {
        line.push_str(&format!("<run at=\"{}..{}\">", range.start, range.end));
    }
    line.push_str(&escape_xml(&doc.slice(range)));
    if show_offsets && tags.is_empty() {
        line.push_str("</run>");
    }
    for (name, _) in tags.iter().rev() {
        line.push_str(&format!("</{name}>"));
    }
}

fn push_line(result: &mut String, line: &str, range: Range<usize>, show_offsets: bool) {
    let at = if show_offsets {
        format!(" at=\"{}..{}\"", range.start, range.end)
    } else {
        String::new()
    };
    if line.is_empty() {
        result.push_str(&format!("  <line{at}/>\n"));
    } else {
        result.push_str(&format!("  <line{at}>{line}</line>\n"));
    }
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}

/// Format implementation for the XML-like tag format
pub struct TagFormat;

impl Format for TagFormat {
    fn name(&self) -> &str {
        "tag"
    }

    fn description(&self) -> &str {
        "XML-like dump of lines and styled runs"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tag", "xml"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &AttributedText) -> Result<String, FormatError> {
        Ok(serialize_document(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &AttributedText,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        Ok(serialize_document_with_params(doc, options))
    }
}
