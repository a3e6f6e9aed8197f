//! Attributed text model
//!
//!     [`style`] is the registry of style identifiers, [`text`] the buffer of characters and
//!     styled ranges, and [`edit`] the selection-level operations built on top of it.

pub mod edit;
pub mod style;
pub mod text;

pub use style::{AuxKind, Style, StyleAux, StyleKind, StyleScope, ALL_STYLES};
pub use text::{AttributedText, StyleRange};
