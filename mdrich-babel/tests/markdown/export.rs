//! Export tests for Markdown format (attributed text → Markdown)
//!
//! Models are built by hand so each test pins one writer rule, then the output is re-parsed
//! with comrak where the structure matters.

use comrak::nodes::NodeValue;
use comrak::{parse_document, Arena, ComrakOptions};
use mdrich_babel::formats::markdown::{serialize_with_options, ExportOptions};
use mdrich_babel::{serialize_to_markdown, AttributedText, Style, StyleKind};

fn styled(text: &str, styles: &[(Style, std::ops::Range<usize>)]) -> AttributedText {
    let mut doc = AttributedText::from_text(text);
    for (style, range) in styles {
        doc.apply_style(style.clone(), range.clone());
    }
    doc
}

/// Names of the top-level blocks comrak sees in `md`.
fn block_kinds(md: &str) -> Vec<&'static str> {
    let arena = Arena::new();
    let root = parse_document(&arena, md, &ComrakOptions::default());
    root.children()
        .map(|child| match child.data.borrow().value {
            NodeValue::Paragraph => "paragraph",
            NodeValue::Heading(_) => "heading",
            NodeValue::List(_) => "list",
            NodeValue::CodeBlock(_) => "code",
            NodeValue::BlockQuote => "quote",
            NodeValue::ThematicBreak => "rule",
            _ => "other",
        })
        .collect()
}

#[test]
fn test_single_blank_line_between_paragraphs() {
    let doc = AttributedText::from_text("A\n\nB\n");
    assert_eq!(serialize_to_markdown(&doc), "A\n\nB\n");

    let doc = AttributedText::from_text("\n\nA\n\n\n\nB\n\n");
    assert_eq!(serialize_to_markdown(&doc), "A\n\nB\n");
}

#[test]
fn test_rule_after_paragraph_stays_a_rule() {
    let doc = styled("text\n———\n", &[(StyleKind::Rule.into(), 5..9)]);
    let md = serialize_to_markdown(&doc);
    assert_eq!(md, "text\n\n---\n");
    assert_eq!(block_kinds(&md), vec!["paragraph", "rule"]);
}

#[test]
fn test_custom_rule_marker() {
    let doc = styled("———\n", &[(StyleKind::Rule.into(), 0..4)]);
    let options = ExportOptions {
        rule: "***".to_string(),
        ..ExportOptions::default()
    };
    assert_eq!(serialize_with_options(&doc, &options), "***\n");
}

#[test]
fn test_every_block_kind_survives_reparse() {
    let doc = styled(
        "Head\nbody\n* item\n* item\nquote\ncode\n———\n",
        &[
            (StyleKind::heading(3).into(), 0..4),
            (StyleKind::BlockQuote.into(), 24..29),
            (Style::code_block(""), 30..35),
            (StyleKind::Rule.into(), 35..39),
        ],
    );
    let md = serialize_to_markdown(&doc);
    assert_eq!(
        md,
        "### Head\n\nbody\n\n* item\n* item\n\n> quote\n\n```\ncode\n```\n\n---\n"
    );
    assert_eq!(
        block_kinds(&md),
        vec!["heading", "paragraph", "list", "quote", "code", "rule"]
    );
}

#[test]
fn test_code_block_after_code_block_gets_new_fence() {
    let doc = styled(
        "a\nb\n",
        &[(Style::code_block(""), 0..2), (Style::code_block("sh"), 2..4)],
    );
    assert_eq!(
        serialize_to_markdown(&doc),
        "```\na\n```\n\n```sh\nb\n```\n"
    );
}

#[test]
fn test_code_block_content_is_verbatim() {
    let doc = styled(
        "**not bold** # [x]\n",
        &[(Style::code_block(""), 0..19)],
    );
    assert_eq!(
        serialize_to_markdown(&doc),
        "```\n**not bold** # [x]\n```\n"
    );
}

#[test]
fn test_literal_punctuation_is_escaped() {
    let doc = AttributedText::from_text("2 * 3 = 6_a [b] `c` \\ &copy; & <tag>\n");
    assert_eq!(
        serialize_to_markdown(&doc),
        "2 \\* 3 = 6\\_a \\[b\\] \\`c\\` \\\\ \\&copy; & <tag>\n"
    );
}

#[test]
fn test_nested_link_styles() {
    let doc = styled(
        "go bold link\n",
        &[
            (Style::link("http://x.com", ""), 3..12),
            (StyleKind::Bold.into(), 3..7),
        ],
    );
    assert_eq!(
        serialize_to_markdown(&doc),
        "go [**bold** link](http://x.com)\n"
    );
}

#[test]
fn test_link_destination_with_spaces() {
    let doc = styled("x\n", &[(Style::link("my file.md", ""), 0..1)]);
    assert_eq!(serialize_to_markdown(&doc), "[x](<my file.md>)\n");
}

#[test]
fn test_heading_with_inline_styles() {
    let doc = styled(
        "Big news\n",
        &[
            (StyleKind::heading(1).into(), 0..8),
            (StyleKind::Italic.into(), 4..8),
        ],
    );
    assert_eq!(serialize_to_markdown(&doc), "# Big *news*\n");
}

#[test]
fn test_no_trailing_newline_is_completed() {
    let doc = styled("end", &[(StyleKind::Bold.into(), 0..3)]);
    assert_eq!(serialize_to_markdown(&doc), "**end**\n");
}
