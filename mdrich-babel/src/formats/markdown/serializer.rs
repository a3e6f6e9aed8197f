//! Markdown export (attributed text → Markdown)
//!
//! Pipeline: AttributedText → segments → [`MarkdownWriter`] → Markdown string
//!
//! The writer makes one left-to-right pass over the runs of constant style (see
//! [`crate::common::segments`]) and keeps three pieces of state between them:
//!
//! - **Line state.** At the start of every line the winning line-level style decides the block
//!   prefix: a code fence, a rule, `#`s, `> `, or nothing for a paragraph. A line starting
//!   with the importer's own marker (the configured bullet or `1.`, then a space) is a list-item
//!   line and its marker is copied raw; any other marker-like start is escaped.
//! - **Delimiter stack.** Inline delimiters are opened lazily, right before the next visible
//!   character, and closed last-opened-first as soon as their style stops. Whitespace at the
//!   edge of a run is held back and emitted outside the delimiters so they stay flanking.
//! - **Last line kind.** Decides whether a blank separator line goes between two lines.
//!
//! Export never fails: anything the model can hold has some Markdown rendering.

use super::escape::{self, is_blank, ListMarker};
use super::options::ExportOptions;
use super::parser::OBJECT_REPLACEMENT;
use crate::common::segments::{segments, Segment};
use crate::model::style::MAX_HEADING_LEVEL;
use crate::model::{AttributedText, Style, StyleAux, StyleKind, StyleRange};
use std::ops::Range;

/// Serialize a whole document with default options.
pub fn serialize_to_markdown(doc: &AttributedText) -> String {
    serialize_with_options(doc, &ExportOptions::default())
}

/// Serialize a whole document.
pub fn serialize_with_options(doc: &AttributedText, options: &ExportOptions) -> String {
    MarkdownWriter::new(doc, 0..doc.len(), options).run()
}

/// Serialize `range` only, treating its start as the start of a line.
pub(crate) fn serialize_bounded(
    doc: &AttributedText,
    range: Range<usize>,
    options: &ExportOptions,
) -> String {
    MarkdownWriter::new(doc, range, options).run()
}

/// Block role of an emitted line, used for blank-line bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Paragraph,
    ListItem,
    Heading,
    /// A line of the code block at this style index.
    Code(usize),
    Rule,
    Quote { list_item: bool },
}

impl LineKind {
    /// Whether a blank line must separate `self` from a following `next` line.
    fn needs_separator(self, next: LineKind) -> bool {
        !matches!(
            (self, next),
            (LineKind::ListItem, LineKind::ListItem)
                | (
                    LineKind::Quote { list_item: true },
                    LineKind::Quote { list_item: true }
                )
        )
    }

    fn is_quote(self) -> bool {
        matches!(self, LineKind::Quote { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Next character starts a line.
    LineStart,
    /// Escaped, styled text.
    Inline,
    /// Code block content, copied as is.
    Verbatim,
    /// Rest of a rule line, or of a blank line.
    Skip,
}

struct OpenDelimiter {
    style: Style,
    closer: String,
}

struct OpenFence {
    index: usize,
    marker: String,
}

/// Per-line bookkeeping for the line being written.
struct Line {
    kind: LineKind,
    /// No visible character emitted yet.
    fresh: bool,
    /// Characters still to copy raw (a list marker).
    raw: usize,
    /// Characters still to drop (indentation of a list marker with no list above it).
    dropped: usize,
    /// Offset of a character that needs a backslash to stay literal.
    escape_at: Option<usize>,
}

impl Line {
    fn new(kind: LineKind) -> Self {
        Line {
            kind,
            fresh: true,
            raw: 0,
            dropped: 0,
            escape_at: None,
        }
    }
}

/// One export pass over a document range.
pub struct MarkdownWriter<'a> {
    doc: &'a AttributedText,
    chars: &'a [char],
    range: Range<usize>,
    options: &'a ExportOptions,
    segments: Vec<Segment>,
    segment: usize,
    out: String,
    stack: Vec<OpenDelimiter>,
    pending_ws: String,
    fence: Option<OpenFence>,
    last_line: Option<LineKind>,
    line: Line,
    mode: Mode,
}

impl<'a> MarkdownWriter<'a> {
    pub fn new(doc: &'a AttributedText, range: Range<usize>, options: &'a ExportOptions) -> Self {
        let range = doc.clamp(range);
        MarkdownWriter {
            doc,
            chars: doc.chars(),
            segments: segments(doc, range.clone()),
            range,
            options,
            segment: 0,
            out: String::new(),
            stack: Vec::new(),
            pending_ws: String::new(),
            fence: None,
            last_line: None,
            line: Line::new(LineKind::Paragraph),
            mode: Mode::LineStart,
        }
    }

    pub fn run(mut self) -> String {
        for index in 0..self.segments.len() {
            self.segment = index;
            let (start, end) = (self.segments[index].start, self.segments[index].end);
            let line_style = self.segments[index]
                .line_style(self.doc)
                .map(|(i, r)| (i, r.clone()));
            let block_only = line_style
                .as_ref()
                .is_some_and(|(_, r)| matches!(r.kind, StyleKind::CodeBlock | StyleKind::Rule));
            let inline = if block_only {
                Vec::new()
            } else {
                self.segments[index].inline_styles(self.doc)
            };

            if self.mode == Mode::Inline {
                self.close_inactive(&inline);
            }
            for offset in start..end {
                if self.mode == Mode::LineStart {
                    self.begin_line(offset, line_style.as_ref());
                }
                let c = self.chars[offset];
                match self.mode {
                    Mode::Verbatim => {
                        self.out.push(c);
                        if c == '\n' {
                            self.last_line = Some(self.line.kind);
                            self.mode = Mode::LineStart;
                        }
                    }
                    Mode::Skip | Mode::LineStart => {
                        if c == '\n' {
                            self.mode = Mode::LineStart;
                        }
                    }
                    Mode::Inline if c == '\n' => self.end_line(),
                    Mode::Inline => self.write_char(offset, c, &inline),
                }
            }
        }
        self.finish()
    }

    /// Decide the block role of the line starting at `offset` and emit its prefix.
    fn begin_line(&mut self, offset: usize, line_style: Option<&(usize, StyleRange)>) {
        if let Some((index, range)) = line_style.filter(|(_, r)| r.kind == StyleKind::CodeBlock) {
            if self.fence.as_ref().map(|f| f.index) != Some(*index) {
                self.close_fence();
                self.separate(LineKind::Code(*index));
                self.open_fence(*index, range);
            }
            self.line = Line::new(LineKind::Code(*index));
            self.mode = Mode::Verbatim;
            return;
        }
        self.close_fence();

        if line_style.is_some_and(|(_, r)| r.kind == StyleKind::Rule) {
            // The glyph is only a placeholder; even a blank one stands for a rule.
            self.separate(LineKind::Rule);
            self.out.push_str(&self.options.rule);
            self.out.push('\n');
            self.last_line = Some(LineKind::Rule);
            self.mode = Mode::Skip;
            return;
        }

        let text = self.line_text(offset);
        if text.iter().all(|&c| is_blank(c)) {
            // Blank model lines emit nothing.
            self.mode = Mode::Skip;
            return;
        }

        match line_style.map(|(_, r)| r.kind) {
            Some(StyleKind::Heading(level)) => {
                let level = level.clamp(1, MAX_HEADING_LEVEL);
                self.separate(LineKind::Heading);
                self.line = Line::new(LineKind::Heading);
                self.line.escape_at = escape::closing_hash_run(&text).map(|i| offset + i);
                self.out.push_str(&"#".repeat(level as usize));
                self.out.push(' ');
            }
            Some(StyleKind::BlockQuote) => {
                let marker = escape::list_marker(&text, self.options.bullet);
                let kind = LineKind::Quote {
                    list_item: marker.is_some(),
                };
                self.separate(kind);
                self.line = Line::new(kind);
                self.out.push_str("> ");
                if let Some(marker) = marker {
                    self.start_list_line(marker, kind);
                }
            }
            _ => match escape::list_marker(&text, self.options.bullet) {
                Some(marker) => {
                    self.separate(LineKind::ListItem);
                    self.line = Line::new(LineKind::ListItem);
                    self.start_list_line(marker, LineKind::ListItem);
                }
                None => {
                    self.separate(LineKind::Paragraph);
                    self.line = Line::new(LineKind::Paragraph);
                }
            },
        }
        self.mode = Mode::Inline;
    }

    /// Copy a list marker raw; its indentation only survives under another list line.
    fn start_list_line(&mut self, marker: ListMarker, kind: LineKind) {
        let nested = self.last_line == Some(kind);
        if nested {
            self.line.raw = marker.len();
        } else {
            self.line.dropped = marker.indent;
            self.line.raw = marker.width;
        }
    }

    /// Emit the separator line owed before a line of `next` kind.
    fn separate(&mut self, next: LineKind) {
        let Some(previous) = self.last_line else {
            return;
        };
        if self.out.is_empty() || !previous.needs_separator(next) {
            return;
        }
        if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        if previous.is_quote() && next.is_quote() {
            self.out.push_str(">\n");
        } else {
            self.out.push('\n');
        }
    }

    fn end_line(&mut self) {
        self.close_from(0);
        self.pending_ws.clear();
        self.out.push('\n');
        self.last_line = Some(self.line.kind);
        self.mode = Mode::LineStart;
    }

    fn write_char(&mut self, offset: usize, c: char, inline: &[Style]) {
        if self.line.dropped > 0 {
            self.line.dropped -= 1;
            return;
        }
        if self.line.raw > 0 {
            self.line.raw -= 1;
            self.out.push(c);
            return;
        }
        let in_code = inline.iter().any(|s| s.kind == StyleKind::Code);
        if is_blank(c) && !in_code {
            if !self.line.fresh {
                self.pending_ws.push(c);
            }
            return;
        }

        let ws = std::mem::take(&mut self.pending_ws);
        self.out.push_str(&ws);
        let before = self.out.len();
        self.open_missing(offset, inline);
        let at_line_start = self.line.fresh && self.out.len() == before;
        self.line.fresh = false;

        if c == OBJECT_REPLACEMENT
            && inline
                .iter()
                .any(|s| matches!(s.kind, StyleKind::Link | StyleKind::Image))
        {
            return;
        }
        if in_code {
            self.out.push(c);
            return;
        }
        if at_line_start && !matches!(self.line.kind, LineKind::Heading) {
            let text = self.line_text(offset);
            if let Some(i) = escape::line_start_escape(&text) {
                self.line.escape_at = Some(offset + i);
            }
        }
        let following = &self.chars[offset + 1..self.range.end];
        if self.line.escape_at == Some(offset) || escape::needs_escape(c, following) {
            self.out.push('\\');
        }
        self.out.push(c);
    }

    /// Open every style of `inline` that is not on the stack yet, in opening order.
    fn open_missing(&mut self, offset: usize, inline: &[Style]) {
        let missing: Vec<&Style> = inline
            .iter()
            .filter(|s| !self.stack.iter().any(|open| &open.style == *s))
            .collect();
        let mut i = 0;
        while i < missing.len() {
            let style = missing[i];
            if style.kind == StyleKind::Bold
                && missing.get(i + 1).map(|s| s.kind) == Some(StyleKind::Italic)
            {
                self.out.push_str("***");
                self.push_open(style.clone(), "**");
                self.push_open(missing[i + 1].clone(), "*");
                i += 2;
                continue;
            }
            match (&style.kind, &style.aux) {
                (StyleKind::Link, aux) => {
                    self.escape_trailing_bang();
                    self.out.push('[');
                    let (url, title) = link_target(aux.as_ref());
                    self.push_open(style.clone(), &escape::link_closer(url, title));
                }
                (StyleKind::Image, aux) => {
                    self.out.push_str("![");
                    let (url, title) = link_target(aux.as_ref());
                    self.push_open(style.clone(), &escape::link_closer(url, title));
                }
                (StyleKind::Bold, _) => {
                    self.out.push_str("**");
                    self.push_open(style.clone(), "**");
                }
                (StyleKind::Italic, _) => {
                    self.out.push('*');
                    self.push_open(style.clone(), "*");
                }
                (StyleKind::Code, _) => {
                    let content = &self.chars[offset..self.code_run_end(offset)];
                    let (open, close) = escape::code_span_delimiters(content);
                    self.out.push_str(&open);
                    self.push_open(style.clone(), &close);
                }
                _ => {}
            }
            i += 1;
        }
    }

    fn push_open(&mut self, style: Style, closer: &str) {
        self.stack.push(OpenDelimiter {
            style,
            closer: closer.to_string(),
        });
    }

    /// Close from the lowest delimiter whose style is no longer active up to the top.
    fn close_inactive(&mut self, inline: &[Style]) {
        if let Some(lowest) = self.stack.iter().position(|o| !inline.contains(&o.style)) {
            self.close_from(lowest);
        }
    }

    /// Pop and close every delimiter at stack index `depth` and above.
    fn close_from(&mut self, depth: usize) {
        while self.stack.len() > depth {
            let Some(top) = self.stack.pop() else {
                break;
            };
            if self.stack.len() > depth {
                let pair = self.stack.last().map(|next| (next.style.kind, top.style.kind));
                if matches!(
                    pair,
                    Some((StyleKind::Bold, StyleKind::Italic))
                        | Some((StyleKind::Italic, StyleKind::Bold))
                ) {
                    self.stack.pop();
                    self.out.push_str("***");
                    continue;
                }
            }
            self.out.push_str(&top.closer);
        }
    }

    /// `!` right before a link opener would turn it into an image.
    fn escape_trailing_bang(&mut self) {
        if self.out.ends_with('!') && !self.out.ends_with("\\!") {
            let at = self.out.len() - 1;
            self.out.insert(at, '\\');
        }
    }

    /// End of the code span starting at `offset`: contiguous code runs, cut at the line end.
    fn code_run_end(&self, offset: usize) -> usize {
        let mut end = self.segments[self.segment].end;
        for segment in &self.segments[self.segment + 1..] {
            if !segment.has_kind(self.doc, StyleKind::Code) {
                break;
            }
            end = segment.end;
        }
        self.chars[offset..end]
            .iter()
            .position(|&c| c == '\n')
            .map_or(end, |i| offset + i)
    }

    fn open_fence(&mut self, index: usize, block: &StyleRange) {
        let info = match &block.aux {
            Some(StyleAux::CodeInfo { info }) => info.as_str(),
            _ => "",
        };
        let mut fence_char = self.options.fence_char();
        if fence_char == '`' && info.contains('`') {
            fence_char = '~';
        }
        let content = &self.chars[block.start..block.end];
        let marker = fence_char
            .to_string()
            .repeat(escape::fence_length(content, fence_char));
        self.out.push_str(&marker);
        self.out.push_str(info);
        self.out.push('\n');
        self.fence = Some(OpenFence { index, marker });
    }

    fn close_fence(&mut self) {
        if let Some(fence) = self.fence.take() {
            if !self.out.ends_with('\n') {
                self.out.push('\n');
            }
            self.out.push_str(&fence.marker);
            self.out.push('\n');
            self.last_line = Some(LineKind::Code(fence.index));
        }
    }

    /// Characters from `offset` to the end of its line, bounded by the export range.
    fn line_text(&self, offset: usize) -> Vec<char> {
        self.chars[offset..self.range.end]
            .iter()
            .take_while(|&&c| c != '\n')
            .copied()
            .collect()
    }

    fn finish(mut self) -> String {
        self.close_from(0);
        self.pending_ws.clear();
        self.close_fence();
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        log::debug!(
            "exported {} chars as {} bytes of markdown",
            self.range.len(),
            self.out.len()
        );
        self.out
    }
}

fn link_target(aux: Option<&StyleAux>) -> (&str, &str) {
    match aux {
        Some(StyleAux::Link { url, title }) | Some(StyleAux::Image { url, title }) => {
            (url.as_str(), title.as_str())
        }
        _ => ("", ""),
    }
}
