//! CLI-specific transforms
//!
//! Views of an imported document for the `inspect` command. Every transform reads the
//! [`Imported`] result, so the degradation report is available next to the model.
//!
//! - `model-tag`: XML-like dump of lines and styled runs (default)
//! - `model-json`: the json save format
//! - `segments`: one row per run of constant style, with its offsets
//! - `report`: what the importer could not represent faithfully
//!
//! ## Extra Parameters
//!
//! - `show-offsets`: annotate `model-tag` lines and unstyled runs with `at="start..end"`
//!
//! Example: `mdrich inspect notes.md model-tag --extra-show-offsets`

use mdrich_babel::common::segments::segments;
use mdrich_babel::formats::{json, tag};
use mdrich_babel::Imported;
use std::collections::HashMap;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["model-tag", "model-json", "segments", "report"];

pub const DEFAULT_TRANSFORM: &str = "model-tag";

/// Execute a named transform on an imported document
///
/// # Examples
///
/// ```ignore
/// let imported = parse_with_options("**hi**\n", &ImportOptions::default())?;
/// let output = execute_transform(&imported, "segments", &HashMap::new())?;
/// ```
pub fn execute_transform(
    imported: &Imported,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    match transform_name {
        "model-tag" => Ok(tag::serialize_document_with_params(
            &imported.text,
            extra_params,
        )),
        "model-json" => json::to_json(&imported.text)
            .map(|mut out| {
                out.push('\n');
                out
            })
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "segments" => Ok(segment_rows(imported)),
        "report" => Ok(report_rows(imported)),
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn segment_rows(imported: &Imported) -> String {
    let doc = &imported.text;
    let mut out = String::new();
    for segment in segments(doc, 0..doc.len()) {
        let names: Vec<&str> = segment.styles(doc).map(|r| r.kind.name()).collect();
        let names = if names.is_empty() {
            "-".to_string()
        } else {
            names.join(",")
        };
        out.push_str(&format!(
            "{}..{}\t{}\t{:?}\n",
            segment.start,
            segment.end,
            names,
            doc.slice(segment.range())
        ));
    }
    out
}

fn report_rows(imported: &Imported) -> String {
    if imported.report.is_lossless() {
        return "lossless\n".to_string();
    }
    imported
        .report
        .degradations
        .iter()
        .map(|d| format!("{d}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdrich_babel::formats::markdown::{parse_with_options, ImportOptions};

    fn import(source: &str) -> Imported {
        parse_with_options(source, &ImportOptions::default()).unwrap()
    }

    #[test]
    fn test_segments_lists_runs_with_style_names() {
        let output = execute_transform(&import("a **b**\n"), "segments", &HashMap::new()).unwrap();
        assert_eq!(output, "0..2\t-\t\"a \"\n2..3\tbold\t\"b\"\n3..4\t-\t\"\\n\"\n");
    }

    #[test]
    fn test_report_lossless() {
        let output = execute_transform(&import("plain\n"), "report", &HashMap::new()).unwrap();
        assert_eq!(output, "lossless\n");
    }

    #[test]
    fn test_report_lists_degradations() {
        let output =
            execute_transform(&import("<div>\nx\n</div>\n"), "report", &HashMap::new()).unwrap();
        assert_eq!(output, "raw html block kept as plain text\n");
    }

    #[test]
    fn test_model_json_is_loadable() {
        let imported = import("*x*\n");
        let output = execute_transform(&imported, "model-json", &HashMap::new()).unwrap();
        assert_eq!(json::from_json(&output).unwrap(), imported.text);
    }

    #[test]
    fn test_unknown_transform() {
        let err = execute_transform(&import("x\n"), "ast-tag", &HashMap::new()).unwrap_err();
        assert!(err.contains("model-tag"));
    }
}
