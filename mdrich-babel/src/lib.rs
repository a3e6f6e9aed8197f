//! Round-trip conversion between Markdown and attributed text
//!
//!     This crate powers a rich-text Markdown editor: Markdown is imported into a flat
//!     [`AttributedText`] (characters plus possibly overlapping styled ranges), edited there, and
//!     exported back to Markdown, either whole or for a selection.
//!
//!     This is a pure lib, that is, it powers mdrich-cli but is shell agnostic: no code here
//!     prints, reads env vars or touches files.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── model
//!     │   ├── style.rs            # Style registry: identifiers, scope, aux data
//!     │   ├── text.rs             # AttributedText and StyleRange
//!     │   └── edit.rs             # Toolbar-level edits
//!     ├── common
//!     │   └── segments.rs         # Runs of constant style, shared by writers
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # Importer (comrak AST → model)
//!     │   │   ├── serializer.rs   # Exporter (model → Markdown)
//!     │   │   ├── selection.rs    # Range export adapter
//!     │   │   ├── escape.rs       # Escaping and delimiter sizing
//!     │   │   └── options.rs
//!     │   ├── json                # Lossless save format
//!     │   ├── tag                 # XML-like run dump
//!     │   └── text                # Plain text
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <area>
//!         ├── <testname>.rs
//!         └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.
//!
//! Core Algorithms
//!
//!     Import is a depth-first walk of the comrak AST that appends text and tags exactly the
//!     appended span with the styles in scope. Export is the hard direction: the model has no
//!     nesting, so the writer walks runs of constant style and keeps a stack of open delimiters,
//!     closing from the lowest style that stopped and opening lazily before visible text. See
//!     ./formats/markdown/serializer.rs.
//!
//!     Round-tripping is idempotent after the first pass except for the lossy cases listed in
//!     ./formats/markdown/mod.rs.

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod model;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use formats::markdown::{
    import_document, parse_from_markdown, serialize_range, serialize_to_markdown, ExportOptions,
    ImportOptions, ImportReport, Imported,
};
pub use model::{AttributedText, Style, StyleAux, StyleKind, StyleRange};
pub use registry::FormatRegistry;
