//! Model tests
//!
//! Editing sequences on the attributed text, checked through the Markdown they export to.

mod editing;
