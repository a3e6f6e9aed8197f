//! Selection export tests ("copy as Markdown").

use mdrich_babel::formats::markdown::ExportOptions;
use mdrich_babel::{parse_from_markdown, serialize_range};

fn select(md: &str, range: std::ops::Range<usize>) -> String {
    let doc = parse_from_markdown(md).expect("Should parse markdown");
    serialize_range(&doc, range, &ExportOptions::default())
}

#[test]
fn test_selection_inside_bold() {
    assert_eq!(select("**hello bold world**\n", 6..10).trim_end(), "**bold**");
}

#[test]
fn test_selection_across_lines_keeps_blocks() {
    // "Title\n\nbody text\n" with the heading on "Title"
    assert_eq!(select("# Title\n\nbody text\n", 2..12), "# tle\n\nbody\n");
}

#[test]
fn test_selection_of_list_item_text() {
    assert_eq!(select("* one\n* two\n", 8..11), "two\n");
}

#[test]
fn test_selection_inside_link_reopens_link() {
    assert_eq!(
        select("[click here](http://x.com)\n", 6..10),
        "[here](http://x.com)\n"
    );
}

#[test]
fn test_empty_and_out_of_range_selections() {
    assert_eq!(select("abc\n", 1..1), "");
    assert_eq!(select("abc\n", 10..20), "");
    assert_eq!(select("abc\n", 3..0), "abc\n");
}
