//! Format implementations
//!
//! This module contains all format implementations that convert between the attributed text
//! model and various text representations.

pub mod json;
pub mod markdown;
pub mod tag;
pub mod text;

pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use tag::TagFormat;
pub use text::TextFormat;
