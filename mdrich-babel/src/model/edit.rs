//! Toolbar-level edits
//!
//!     Selection-driven mutations layered on top of the primitive [`AttributedText`] operations:
//!     toggling character styles, switching the heading level of the selected lines and
//!     inserting a horizontal rule at the cursor. They keep line-level styles exclusive.

use super::style::{Style, StyleKind};
use super::text::AttributedText;
use std::ops::Range;

impl AttributedText {
    /// Remove `kind` from `range` if every character there already has it, otherwise apply it.
    ///
    /// Returns whether the style is now present over the range. Line-level kinds are ignored
    /// (use [`AttributedText::set_heading`] for those).
    pub fn toggle_style(&mut self, kind: StyleKind, range: Range<usize>) -> bool {
        let range = self.clamp(range);
        if range.is_empty() || kind.is_line_level() {
            return false;
        }
        if self.covers(kind, range.clone()) {
            self.remove_style(kind, range);
            false
        } else {
            self.apply_style(Style::plain(kind), range);
            true
        }
    }

    /// Whole lines touched by `range`, trailing newline of the last line included when present.
    pub fn line_span(&self, range: Range<usize>) -> Range<usize> {
        let range = self.clamp(range);
        let start = self.line_bounds(range.start).start;
        let last = if range.end > range.start {
            range.end - 1
        } else {
            range.end
        };
        let end = self.line_bounds(last.max(start)).end;
        let end = if self.char_at(end) == Some('\n') {
            end + 1
        } else {
            end
        };
        start..end
    }

    /// Set (or with `None`, clear) the heading level of every line touched by `range`.
    ///
    /// Other line-level styles on those lines are removed so headings stay exclusive.
    pub fn set_heading(&mut self, range: Range<usize>, level: Option<u8>) {
        let lines = self.line_span(range);
        self.remove_styles_where(lines.clone(), StyleKind::is_line_level);
        if let Some(level) = level.filter(|&l| l > 0) {
            // The heading ends before the final newline, like imported headings.
            let end = if lines.end > lines.start && self.char_at(lines.end - 1) == Some('\n') {
                lines.end - 1
            } else {
                lines.end
            };
            self.apply_style(Style::plain(StyleKind::heading(level)), lines.start..end);
        }
        log::debug!("set heading {:?} over {:?}", level, lines);
    }

    /// Insert a horizontal rule at `offset`, starting a new line first when needed.
    ///
    /// Returns the offset just past the rule's newline.
    pub fn insert_rule(&mut self, offset: usize, glyph: &str) -> usize {
        let mut at = offset.min(self.len());
        if at > 0 && self.char_at(at - 1) != Some('\n') {
            at = self.insert(at, "\n").end;
        }
        let rule = self.insert(at, &format!("{glyph}\n"));
        self.remove_styles_where(rule.clone(), |_| true);
        self.apply_style(Style::plain(StyleKind::Rule), rule.clone());
        rule.end
    }
}
