//! Markdown for a selection ("copy as Markdown").
//!
//! Runs the regular exporter over a sub-range. The first character of the selection is treated
//! as the start of a line, and styles that began before the selection open at its start.

use super::options::ExportOptions;
use super::serializer::serialize_bounded;
use crate::model::AttributedText;
use std::ops::Range;

/// Markdown for `range` of `doc`. Bounds are clamped and ordered; an empty selection gives `""`.
pub fn serialize_range(doc: &AttributedText, range: Range<usize>, options: &ExportOptions) -> String {
    let range = doc.clamp(range);
    if range.is_empty() {
        return String::new();
    }
    log::debug!("exporting selection {:?}", range);
    serialize_bounded(doc, range, options)
}

/// Parse a `start..end` selection, as passed through the `range` format option.
pub fn parse_range(value: &str) -> Option<Range<usize>> {
    let (start, end) = value.split_once("..")?;
    Some(start.trim().parse().ok()?..end.trim().parse().ok()?)
}
