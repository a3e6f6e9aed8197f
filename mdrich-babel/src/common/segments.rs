//! Splits an attributed text into runs with a constant set of active styles.
//!
//! # The High-Level Concept
//!
//! A transition point is any offset where some style starts or ends. Between two consecutive
//! transition points the set of active styles does not change, so every consumer that needs to
//! know "which styles apply here" (the markdown exporter, the tag dump) can work run by run
//! instead of asking per character.
//!
//! # The Algorithm
//!
//! 1. **Collect points:**
//!    - The bounds of the requested range
//!    - Every style start and end, clipped to the range
//!    - Sort and dedup
//!
//! 2. **Sweep:**
//!    - Style indices are ordered by their (clipped) start
//!    - At each point, drop active styles that ended and admit styles that started
//!    - Emit one [`Segment`] per pair of consecutive points
//!
//! Each style enters and leaves the active set once, so the sweep is linear in the number of
//! points plus styles (after sorting).

use crate::model::{AttributedText, Style, StyleKind, StyleRange};
use std::ops::Range;

/// A run `[start, end)` and the indices (into [`AttributedText::styles`]) of its styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub active: Vec<usize>,
}

impl Segment {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn styles<'a>(&'a self, doc: &'a AttributedText) -> impl Iterator<Item = &'a StyleRange> {
        self.active.iter().map(move |&i| &doc.styles()[i])
    }

    /// The winning line-level style of this run and its index, by line priority.
    pub fn line_style<'a>(&self, doc: &'a AttributedText) -> Option<(usize, &'a StyleRange)> {
        let styles = doc.styles();
        self.active
            .iter()
            .map(|&i| (i, &styles[i]))
            .filter(|(_, r)| r.kind.is_line_level())
            .min_by_key(|(i, r)| (r.kind.line_priority(), *i))
    }

    /// Distinct character-level styles of this run, in delimiter opening order.
    pub fn inline_styles(&self, doc: &AttributedText) -> Vec<Style> {
        let mut styles: Vec<Style> = Vec::new();
        for range in self.styles(doc).filter(|r| r.kind.is_inline()) {
            let style = range.style();
            if !styles.contains(&style) {
                styles.push(style);
            }
        }
        styles.sort_by_key(|s| s.kind.open_rank());
        styles
    }

    pub fn has_kind(&self, doc: &AttributedText, kind: StyleKind) -> bool {
        self.styles(doc).any(|r| r.kind == kind)
    }
}

/// Sorted, deduplicated transition points of `range`, bounds included.
pub fn transition_points(doc: &AttributedText, range: Range<usize>) -> Vec<usize> {
    let range = doc.clamp(range);
    let mut points = vec![range.start, range.end];
    for style in doc.styles() {
        for p in [style.start, style.end] {
            if range.start < p && p < range.end {
                points.push(p);
            }
        }
    }
    points.sort_unstable();
    points.dedup();
    points
}

/// Runs of constant style over `range`. Empty for an empty range.
pub fn segments(doc: &AttributedText, range: Range<usize>) -> Vec<Segment> {
    let range = doc.clamp(range);
    if range.is_empty() {
        return Vec::new();
    }
    let styles = doc.styles();
    let clipped_start = |i: usize| styles[i].start.max(range.start);

    let mut pending: Vec<usize> = (0..styles.len())
        .filter(|&i| {
            let r = &styles[i];
            !r.is_empty() && r.start < range.end && r.end > range.start
        })
        .collect();
    pending.sort_by_key(|&i| (clipped_start(i), i));

    let points = transition_points(doc, range.clone());
    let mut active: Vec<usize> = Vec::new();
    let mut next = 0;
    let mut out = Vec::with_capacity(points.len().saturating_sub(1));
    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        active.retain(|&i| styles[i].end > start);
        while next < pending.len() && clipped_start(pending[next]) <= start {
            active.push(pending[next]);
            next += 1;
        }
        active.sort_unstable();
        out.push(Segment {
            start,
            end,
            active: active.clone(),
        });
    }
    log::trace!("{} segments over {:?}", out.len(), range);
    out
}
