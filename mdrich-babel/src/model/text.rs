//! Attributed text
//!
//!     A mutable sequence of characters plus a list of styled ranges over it. This is the
//!     editor's buffer: the importer fills it, edits mutate it, the exporter and the range
//!     adapter only read it.
//!
//!     All offsets are char offsets (not bytes) and ranges are half-open. Line-level styles are
//!     mutually exclusive per character, character-level styles overlap freely.

use super::style::{AuxKind, Style, StyleAux, StyleKind};
use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One styled span of an [`AttributedText`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    pub kind: StyleKind,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub aux: Option<StyleAux>,
}

impl StyleRange {
    pub fn new(style: Style, range: Range<usize>) -> Self {
        StyleRange {
            kind: style.kind,
            start: range.start,
            end: range.end,
            aux: style.aux,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn style(&self) -> Style {
        Style::with_aux(self.kind, self.aux.clone())
    }

    pub fn has_style(&self, style: &Style) -> bool {
        self.kind == style.kind && self.aux == style.aux
    }
}

/// Text plus styled ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributedText {
    chars: Vec<char>,
    styles: Vec<StyleRange>,
}

impl AttributedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unstyled text.
    pub fn from_text(text: &str) -> Self {
        AttributedText {
            chars: text.chars().collect(),
            styles: Vec::new(),
        }
    }

    /// Build from raw parts, rejecting ranges that fall outside the text or carry the wrong
    /// kind of auxiliary data. Used by the json save format.
    pub fn from_parts(text: &str, styles: Vec<StyleRange>) -> Result<Self, FormatError> {
        let mut doc = AttributedText::from_text(text);
        for range in styles {
            if range.start > range.end || range.end > doc.len() {
                return Err(FormatError::ParseError(format!(
                    "style '{}' range {}..{} is outside the text (length {})",
                    range.kind,
                    range.start,
                    range.end,
                    doc.len()
                )));
            }
            let aux_kind = range.aux.as_ref().map_or(AuxKind::None, StyleAux::kind);
            if aux_kind != AuxKind::None && aux_kind != range.kind.aux_kind() {
                return Err(FormatError::ParseError(format!(
                    "style '{}' cannot carry {:?} data",
                    range.kind, aux_kind
                )));
            }
            if !range.is_empty() {
                doc.styles.push(StyleRange {
                    kind: range.kind.normalized(),
                    ..range
                });
            }
        }
        Ok(doc)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Text of a sub-range, clamped to the document.
    pub fn slice(&self, range: Range<usize>) -> String {
        let range = self.clamp(range);
        self.chars[range].iter().collect()
    }

    pub fn styles(&self) -> &[StyleRange] {
        &self.styles
    }

    pub fn ends_with_newline(&self) -> bool {
        self.chars.last() == Some(&'\n')
    }

    /// Clamp a range to the document and put its bounds in order.
    pub fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let start = range.start.min(self.len());
        let end = range.end.min(self.len());
        if start <= end {
            start..end
        } else {
            end..start
        }
    }

    /// Styles covering `offset`.
    pub fn styles_at(&self, offset: usize) -> impl Iterator<Item = &StyleRange> {
        self.styles.iter().filter(move |r| r.contains(offset))
    }

    pub fn has_style_at(&self, kind: StyleKind, offset: usize) -> bool {
        self.styles_at(offset).any(|r| r.kind == kind)
    }

    /// Whether every character of `range` carries `kind`. False for an empty range.
    pub fn covers(&self, kind: StyleKind, range: Range<usize>) -> bool {
        let range = self.clamp(range);
        !range.is_empty() && range.into_iter().all(|offset| self.has_style_at(kind, offset))
    }

    /// Bounds of the line holding `offset`, newline excluded.
    pub fn line_bounds(&self, offset: usize) -> Range<usize> {
        let offset = offset.min(self.len());
        let start = self.chars[..offset]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        let end = self.chars[offset..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.len(), |i| offset + i);
        start..end
    }

    /// Append `text` and give the appended span every style in `styles`.
    pub fn append(&mut self, text: &str, styles: &[Style]) -> Range<usize> {
        let start = self.len();
        self.chars.extend(text.chars());
        let span = start..self.len();
        for style in styles {
            self.apply_style(style.clone(), span.clone());
        }
        span
    }

    /// Add a style over `range`, extending a touching or overlapping range with the same kind
    /// and aux instead of creating a second one.
    pub fn apply_style(&mut self, style: Style, range: Range<usize>) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }
        let mut merged = StyleRange::new(style, range);
        merged.kind = merged.kind.normalized();
        if merged.kind.coalesces() {
            let mut i = 0;
            while i < self.styles.len() {
                let existing = &self.styles[i];
                let touches = existing.start <= merged.end && merged.start <= existing.end;
                if touches && existing.kind == merged.kind && existing.aux == merged.aux {
                    merged.start = merged.start.min(existing.start);
                    merged.end = merged.end.max(existing.end);
                    self.styles.swap_remove(i);
                } else {
                    i += 1;
                }
            }
        } else if self.styles.contains(&merged) {
            return;
        }
        self.styles.push(merged);
        self.styles.sort_by_key(|r| (r.start, r.end));
    }

    /// Remove `kind` from `range`, splitting ranges that extend past it.
    pub fn remove_style(&mut self, kind: StyleKind, range: Range<usize>) {
        self.remove_styles_where(range, |k| k == kind);
    }

    /// Remove every style whose kind matches `pred` from `range`.
    pub fn remove_styles_where(&mut self, range: Range<usize>, pred: impl Fn(StyleKind) -> bool) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }
        let mut kept = Vec::with_capacity(self.styles.len());
        for style in self.styles.drain(..) {
            if !pred(style.kind) || style.end <= range.start || style.start >= range.end {
                kept.push(style);
                continue;
            }
            if style.start < range.start {
                kept.push(StyleRange {
                    end: range.start,
                    ..style.clone()
                });
            }
            if style.end > range.end {
                kept.push(StyleRange {
                    start: range.end,
                    ..style
                });
            }
        }
        kept.sort_by_key(|r| (r.start, r.end));
        self.styles = kept;
    }

    /// Insert unstyled text at `offset` (clamped).
    ///
    /// Ranges starting at or after the offset shift, ranges strictly containing it grow, ranges
    /// ending exactly at it stay put.
    pub fn insert(&mut self, offset: usize, text: &str) -> Range<usize> {
        let offset = offset.min(self.len());
        let inserted: Vec<char> = text.chars().collect();
        let n = inserted.len();
        self.chars.splice(offset..offset, inserted);
        for style in &mut self.styles {
            if style.start >= offset {
                style.start += n;
                style.end += n;
            } else if style.end > offset {
                style.end += n;
            }
        }
        offset..offset + n
    }

    /// Delete a range of characters, shrinking or dropping the styles over it.
    pub fn delete(&mut self, range: Range<usize>) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }
        let n = range.len();
        self.chars.drain(range.clone());
        let adjust = |p: usize| {
            if p <= range.start {
                p
            } else if p >= range.end {
                p - n
            } else {
                range.start
            }
        };
        for style in &mut self.styles {
            style.start = adjust(style.start);
            style.end = adjust(style.end);
        }
        self.styles.retain(|r| !r.is_empty());
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.styles.clear();
    }
}
