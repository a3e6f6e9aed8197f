use mdrich_babel::formats::json::{from_json, to_json};
use mdrich_babel::{parse_from_markdown, serialize_to_markdown, AttributedText, StyleKind};

#[test]
fn test_toolbar_session() {
    let mut doc = AttributedText::from_text("hello world\n");
    doc.toggle_style(StyleKind::Bold, 0..5);
    doc.set_heading(3..3, Some(1));
    assert_eq!(serialize_to_markdown(&doc), "# **hello** world\n");

    doc.set_heading(0..11, None);
    doc.toggle_style(StyleKind::Bold, 0..5);
    assert_eq!(serialize_to_markdown(&doc), "hello world\n");
}

#[test]
fn test_insert_rule_at_cursor() {
    let mut doc = AttributedText::from_text("ab");
    let cursor = doc.insert_rule(2, "\u{2014}\u{2014}\u{2014}");
    assert_eq!(cursor, doc.len());
    assert_eq!(serialize_to_markdown(&doc), "ab\n\n---\n");
}

#[test]
fn test_typing_inside_and_after_bold() {
    let mut doc = parse_from_markdown("**bold** end\n").unwrap();
    doc.insert(2, "XX");
    doc.insert(6, "!");
    assert_eq!(serialize_to_markdown(&doc), "**boXXld**! end\n");
}

#[test]
fn test_deleting_across_styles() {
    let mut doc = parse_from_markdown("a **bold** and *it* z\n").unwrap();
    // "a bold and it z\n": drop "ld and i"
    doc.delete(4..12);
    assert_eq!(serialize_to_markdown(&doc), "a **bo***t* z\n");
}

#[test]
fn test_clear_empties_everything() {
    let mut doc = parse_from_markdown("# x\n").unwrap();
    doc.clear();
    assert!(doc.is_empty());
    assert_eq!(serialize_to_markdown(&doc), "");
}

#[test]
fn test_json_save_preserves_markdown() {
    let md = "## Notes\n\nSee [docs](http://x.com \"Docs\") and `code`.\n";
    let doc = parse_from_markdown(md).unwrap();
    let restored = from_json(&to_json(&doc).unwrap()).unwrap();
    assert_eq!(serialize_to_markdown(&restored), md);
}
