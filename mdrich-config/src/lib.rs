//! Shared configuration loader for the mdrich toolchain.
//!
//! `defaults/mdrich.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdrichConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use mdrich_babel::formats::markdown::{ExportOptions, ImportOptions};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/mdrich.default.toml");

/// Top-level configuration consumed by mdrich applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdrichConfig {
    pub import: ImportConfig,
    pub export: ExportConfig,
    pub inspect: InspectConfig,
    pub logging: LoggingConfig,
}

impl MdrichConfig {
    pub fn import_options(&self) -> ImportOptions {
        (&self.import).into()
    }

    /// Export options carrying the import bullet, so list lines the importer wrote are
    /// recognised on the way back out.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            bullet: self.import.bullet,
            ..(&self.export).into()
        }
    }

    /// Reject values the markdown importer or exporter cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.import_options()
            .validate()
            .and_then(|()| self.export_options().validate())
            .map_err(|err| ConfigError::Message(err.to_string()))
    }
}

/// Mirrors the knobs of the Markdown importer.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub smart_punctuation: bool,
    pub bullet: char,
    pub rule_glyph: String,
}

impl From<&ImportConfig> for ImportOptions {
    fn from(config: &ImportConfig) -> Self {
        ImportOptions {
            smart_punctuation: config.smart_punctuation,
            bullet: config.bullet,
            rule_glyph: config.rule_glyph.clone(),
        }
    }
}

/// Mirrors the knobs of the Markdown exporter.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub fence: char,
    pub rule: String,
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        ExportOptions {
            fence: config.fence,
            rule: config.rule.clone(),
            ..ExportOptions::default()
        }
    }
}

/// Controls inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_offsets: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Raise the level by `steps` (one per `-v`), saturating at trace.
    pub fn raised(self, steps: u8) -> Self {
        const ORDER: [LogLevel; 5] = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let index = ORDER.iter().position(|l| *l == self).unwrap_or(0);
        ORDER[(index + steps as usize).min(ORDER.len() - 1)]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<MdrichConfig, ConfigError> {
        let config: MdrichConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<MdrichConfig, ConfigError> {
    Loader::new().build()
}
