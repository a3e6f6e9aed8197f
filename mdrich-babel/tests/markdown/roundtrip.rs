//! Round-trip tests: Markdown → model → Markdown.
//!
//! Canonical Markdown re-exports unchanged. Everything else converges after one pass, which the
//! property test checks over a small generated grammar.

use super::fixture;
use mdrich_babel::{parse_from_markdown, serialize_to_markdown};
use proptest::prelude::*;

fn round_trip(md: &str) -> String {
    serialize_to_markdown(&parse_from_markdown(md).expect("Should parse markdown"))
}

#[test]
fn test_canonical_markdown_is_stable() {
    let cases = [
        "Plain paragraph.\n",
        "# Heading\n\nText after.\n",
        "***x***\n",
        "a **b** *c* `d`\n",
        "* one\n* two\n",
        "1. one\n1. two\n",
        "> quote\n",
        "```\ncode\n```\n",
        "---\n",
        "[link](http://x.com)\n",
        "A \\* star\n",
        "A\n\nB\n",
        "``a`b``\n",
    ];
    for md in cases {
        assert_eq!(round_trip(md), md, "round trip of {md:?}");
    }
}

#[test]
fn test_kitchensink_round_trips_verbatim() {
    let md = fixture("kitchensink.md");
    assert_eq!(round_trip(&md), md);
}

#[test]
fn test_literal_list_markers_stay_paragraphs() {
    let cases = [
        "2024\\. was a year\n",
        "\\- not a list\n",
        "\\+ not a list\n",
        "10\\. ten\n",
        "10\\) ten\n",
        "* \\- nested text\n",
    ];
    for md in cases {
        assert_eq!(round_trip(md), md, "round trip of {md:?}");
    }
}

#[test]
fn test_heading_in_quote_drops_the_quote() {
    assert_eq!(round_trip("> # T\n\nafter\n"), "# T\n\nafter\n");
}

#[test]
fn test_bold_italic_nesting_normalises() {
    assert_eq!(round_trip("**_x_**\n"), "***x***\n");
    assert_eq!(round_trip("__bold__ _it_\n"), "**bold** *it*\n");
}

#[test]
fn test_ordered_lists_renumber() {
    assert_eq!(round_trip("3. x\n4. y\n"), "1. x\n1. y\n");
}

#[test]
fn test_breaks_are_lossy() {
    assert_eq!(round_trip("a\nb\n"), "a b\n");
    assert_eq!(round_trip("a  \nb\n"), "a\n\nb\n");
}

#[test]
fn test_lossy_fixture_converges() {
    let once = round_trip(&fixture("lossy.md"));
    assert_eq!(
        once,
        "Soft break and hard\n\nbreak.\n\n1. three\n1. four\n\n<div>\n\nraw\n\n</div>\n"
    );
    assert_eq!(round_trip(&once), once);
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

/// Words that look like block markers once their backslash is gone.
fn marker_word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("\\-".to_string()),
        Just("\\+".to_string()),
        word().prop_map(|w| format!("\\-{w}")),
        (2..100_000u32).prop_map(|n| format!("{n}\\.")),
        (1..100u32).prop_map(|n| format!("{n}\\)")),
        (0..10u32, 0..100u32).prop_map(|(a, b)| format!("{a}.{b}")),
    ]
}

fn inline() -> impl Strategy<Value = String> {
    prop_oneof![
        word(),
        marker_word(),
        word().prop_map(|w| format!("**{w}**")),
        word().prop_map(|w| format!("*{w}*")),
        word().prop_map(|w| format!("`{w}`")),
    ]
}

fn words(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(inline(), 1..max).prop_map(|parts| parts.join(" "))
}

fn block() -> impl Strategy<Value = String> {
    prop_oneof![
        words(6),
        (1..=3usize, words(4)).prop_map(|(level, text)| format!("{} {text}", "#".repeat(level))),
        prop::collection::vec(words(3), 1..4).prop_map(|items| {
            items
                .iter()
                .map(|item| format!("* {item}"))
                .collect::<Vec<_>>()
                .join("\n")
        }),
        prop::collection::vec(word(), 1..4)
            .prop_map(|lines| format!("```\n{}\n```", lines.join("\n"))),
        Just("---".to_string()),
    ]
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(block(), 1..6).prop_map(|blocks| format!("{}\n", blocks.join("\n\n")))
}

proptest! {
    #[test]
    fn prop_export_is_idempotent(md in document()) {
        let once = round_trip(&md);
        let twice = round_trip(&once);
        prop_assert_eq!(once, twice);
    }
}
