//! Import and export knobs for the markdown format.

use super::escape;
use crate::error::FormatError;
use serde::{Deserialize, Serialize};

/// Glyph inserted for a thematic break: three em dashes.
pub const DEFAULT_RULE_GLYPH: &str = "\u{2014}\u{2014}\u{2014}";

/// Characters CommonMark accepts as bullet list markers.
pub const LIST_BULLETS: [char; 3] = ['*', '-', '+'];

/// Options controlling Markdown → attributed text import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Typographic quotes, dashes and ellipses while parsing.
    pub smart_punctuation: bool,
    /// Bullet inserted before unordered list items.
    pub bullet: char,
    /// Text inserted (tagged `hr`) for a thematic break.
    pub rule_glyph: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            smart_punctuation: true,
            bullet: '*',
            rule_glyph: DEFAULT_RULE_GLYPH.to_string(),
        }
    }
}

impl ImportOptions {
    /// Reject settings that would produce text the exporter cannot read back.
    pub fn validate(&self) -> Result<(), FormatError> {
        check_bullet(self.bullet)?;
        let multiline = self.rule_glyph.contains(|c: char| c == '\n' || c == '\r');
        if self.rule_glyph.trim().is_empty() || multiline {
            return Err(FormatError::InvalidInput(format!(
                "rule glyph {:?} must be non-blank and fit on one line",
                self.rule_glyph
            )));
        }
        Ok(())
    }
}

/// Options controlling attributed text → Markdown export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Code block fence character, `` ` `` or `~`.
    pub fence: char,
    /// Markdown emitted for an `hr` line.
    pub rule: String,
    /// Bullet the importer wrote. Only this bullet or `1.`, followed by a space, makes a
    /// list line; any other marker-like prefix is escaped.
    pub bullet: char,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            fence: '`',
            rule: "---".to_string(),
            bullet: '*',
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), FormatError> {
        check_bullet(self.bullet)?;
        if !matches!(self.fence, '`' | '~') {
            return Err(FormatError::InvalidInput(format!(
                "fence {:?} must be ` or ~",
                self.fence
            )));
        }
        if !escape::is_thematic_break(&self.rule) {
            return Err(FormatError::InvalidInput(format!(
                "rule {:?} is not a thematic break",
                self.rule
            )));
        }
        Ok(())
    }

    /// The fence character, falling back to a backtick for anything but `~`.
    pub fn fence_char(&self) -> char {
        if self.fence == '~' {
            '~'
        } else {
            '`'
        }
    }
}

fn check_bullet(bullet: char) -> Result<(), FormatError> {
    if LIST_BULLETS.contains(&bullet) {
        Ok(())
    } else {
        Err(FormatError::InvalidInput(format!(
            "bullet {bullet:?} must be one of * - +"
        )))
    }
}
