//! Markdown format tests
//!
//! Import, export, round-trip and selection tests for Markdown ↔ attributed text.

mod export;
mod import;
mod roundtrip;
mod selection;

use std::path::PathBuf;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}
