//! Import tests for Markdown format (Markdown → attributed text)
//!
//! These tests check the model text and its style ranges, mostly through the tag dump.

use super::fixture;
use insta::assert_snapshot;
use mdrich_babel::formats::markdown::{parse_with_options, Degradation, ImportOptions};
use mdrich_babel::formats::tag::serialize_document;
use mdrich_babel::{parse_from_markdown, StyleAux, StyleKind};

fn dump(md: &str) -> String {
    serialize_document(&parse_from_markdown(md).expect("Should parse markdown"))
}

#[test]
fn test_paragraph_simple() {
    let doc = parse_from_markdown("This is a simple paragraph.\n").unwrap();
    assert_eq!(doc.text(), "This is a simple paragraph.\n");
    assert!(doc.styles().is_empty());
}

#[test]
fn test_heading_and_inline_runs() {
    assert_snapshot!(dump("# T\n\nA **b** [c](u)\n"), @r#"
<document>
  <line><heading1>T</heading1></line>
  <line/>
  <line>A <bold>b</bold> <link url="u">c</link></line>
</document>
"#);
}

#[test]
fn test_nested_list_indentation() {
    assert_snapshot!(dump("- a\n  - b\n    1. c\n- d\n"), @r#"
<document>
  <line>* a</line>
  <line>  * b</line>
  <line>    1. c</line>
  <line>* d</line>
</document>
"#);
}

#[test]
fn test_quoted_list_items_carry_quote_on_markers() {
    let doc = parse_from_markdown("> * a\n> * b\n").unwrap();
    assert_eq!(doc.text(), "* a\n* b\n");
    let quoted: Vec<_> = doc
        .styles()
        .iter()
        .filter(|r| r.kind == StyleKind::BlockQuote)
        .map(|r| r.range())
        .collect();
    assert_eq!(quoted, vec![0..3, 4..7]);
}

#[test]
fn test_heading_inside_quote_replaces_quote_style() {
    let doc = parse_from_markdown("> # T\n").unwrap();
    assert_eq!(doc.text(), "T\n\n");
    let kinds: Vec<_> = doc.styles().iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![StyleKind::Heading(1)]);
}

#[test]
fn test_code_block_info_is_kept() {
    let doc = parse_from_markdown("```rust\nfn main() {}\n```\n").unwrap();
    assert_eq!(doc.text(), "fn main() {}\n");
    assert_eq!(
        doc.styles()[0].aux,
        Some(StyleAux::CodeInfo {
            info: "rust".to_string()
        })
    );
}

#[test]
fn test_unterminated_code_block_gets_newline() {
    let doc = parse_from_markdown("```\nlast").unwrap();
    assert_eq!(doc.text(), "last\n");
    assert_eq!(doc.styles()[0].range(), 0..5);
}

#[test]
fn test_inner_block_style_replaces_outer() {
    let doc = parse_from_markdown("> # Quoted title\n").unwrap();
    let kinds: Vec<_> = doc.styles_at(0).map(|r| r.kind).collect();
    assert_eq!(kinds, vec![StyleKind::heading(1)]);
}

#[test]
fn test_image_and_inline_html() {
    assert_snapshot!(dump("![alt](a.png \"T\") and <kbd>x</kbd>\n"), @r#"
<document>
  <line><image url="a.png" title="T">alt</image> and &lt;kbd&gt;x&lt;/kbd&gt;</line>
</document>
"#);
}

#[test]
fn test_custom_bullet_and_rule_glyph() {
    let options = ImportOptions {
        bullet: '-',
        rule_glyph: "***".to_string(),
        ..ImportOptions::default()
    };
    let imported = parse_with_options("* a\n\n---\n", &options).unwrap();
    assert_eq!(imported.text.text(), "- a\n***\n");
}

#[test]
fn test_lossy_fixture_report() {
    let imported = parse_with_options(&fixture("lossy.md"), &ImportOptions::default()).unwrap();
    assert_eq!(
        imported.text.text(),
        "Soft break and hard\nbreak.\n1. three\n1. four\n<div>\nraw\n</div>\n"
    );
    assert_eq!(imported.report.degradations, vec![Degradation::RawHtmlBlock]);
}

#[test]
fn test_kitchensink_styles() {
    let doc = parse_from_markdown(&fixture("kitchensink.md")).unwrap();
    let text = doc.text();
    assert!(text.starts_with("Kitchen sink\n\nIntro with bold, italic, code and a link.\n"));
    for kind in [
        StyleKind::heading(1),
        StyleKind::heading(2),
        StyleKind::Bold,
        StyleKind::Italic,
        StyleKind::Code,
        StyleKind::Link,
        StyleKind::Image,
        StyleKind::BlockQuote,
        StyleKind::Rule,
        StyleKind::CodeBlock,
    ] {
        assert!(
            doc.styles().iter().any(|r| r.kind == kind),
            "missing {kind}"
        );
    }
}
