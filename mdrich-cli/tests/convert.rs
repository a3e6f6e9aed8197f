use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("mdrich-babel")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn convert_markdown_to_markdown_is_stable() {
    let fixture = fixture_path("kitchensink.md");
    let expected = fs::read_to_string(&fixture).unwrap();

    let mut cmd = cargo_bin_cmd!("mdrich");
    cmd.arg(&fixture).arg("--to").arg("markdown");

    cmd.assert().success().stdout(expected);
}

#[test]
fn convert_through_json_save_file() {
    let fixture = fixture_path("kitchensink.md");
    let expected = fs::read_to_string(&fixture).unwrap();
    let dir = tempdir().unwrap();
    let saved = dir.path().join("kitchensink.json");

    let mut cmd = cargo_bin_cmd!("mdrich");
    cmd.arg("convert")
        .arg(&fixture)
        .arg("--to")
        .arg("json")
        .arg("-o")
        .arg(&saved);
    cmd.assert().success();

    let json = fs::read_to_string(&saved).unwrap();
    assert!(json.contains("\"kind\": \"heading1\""));
    assert!(json.contains("\"kind\": \"codeblock\""));

    let mut cmd = cargo_bin_cmd!("mdrich");
    cmd.arg("convert").arg(&saved).arg("--to").arg("markdown");
    cmd.assert().success().stdout(expected);
}

#[test]
fn convert_to_tag_dumps_runs() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Title\n\nsome **loud** words\n").unwrap();

    let mut cmd = cargo_bin_cmd!("mdrich");
    cmd.arg(&input).arg("--to").arg("tag");

    cmd.assert().success().stdout(
        predicate::str::contains("<line><heading1>Title</heading1></line>")
            .and(predicate::str::contains("<bold>loud</bold>")),
    );
}

#[test]
fn convert_passes_extra_parameters_to_markdown() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "```\ncode\n```\n").unwrap();

    let mut cmd = cargo_bin_cmd!("mdrich");
    cmd.arg(&input)
        .arg("--to")
        .arg("markdown")
        .arg("--extra-fence")
        .arg("tilde");

    cmd.assert().success().stdout("~~~\ncode\n~~~\n");
}

#[test]
fn convert_rejects_unknown_extra_parameter() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "text\n").unwrap();

    let mut cmd = cargo_bin_cmd!("mdrich");
    cmd.arg(&input)
        .arg("--to")
        .arg("markdown")
        .arg("--extra-theme")
        .arg("dark");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("theme"));
}

#[test]
fn convert_unknown_format_fails() {
    let fixture = fixture_path("kitchensink.md");

    let mut cmd = cargo_bin_cmd!("mdrich");
    cmd.arg(&fixture).arg("--to").arg("docx");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("docx"));
}

#[test]
fn convert_undetectable_input_needs_from() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.unknown");
    fs::write(&input, "**x**\n").unwrap();

    let mut cmd = cargo_bin_cmd!("mdrich");
    cmd.arg(&input).arg("--to").arg("markdown");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--from"));

    let mut cmd = cargo_bin_cmd!("mdrich");
    cmd.arg(&input)
        .arg("--from")
        .arg("markdown")
        .arg("--to")
        .arg("text");
    cmd.assert().success().stdout("x\n");
}

#[test]
fn list_formats_shows_formats_and_transforms() {
    let mut cmd = cargo_bin_cmd!("mdrich");
    cmd.arg("--list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("markdown")
            .and(predicate::str::contains("json"))
            .and(predicate::str::contains("model-tag"))
            .and(predicate::str::contains("segments")),
    );
}
